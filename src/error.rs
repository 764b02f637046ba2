use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::modules::components::probe_video::probe_video_fl::StreamProfile;

/// Failure to read the first video stream of one file
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ffprobe not found at {}", .0.display())]
    ToolNotFound(PathBuf),

    #[error("failed to start ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("unreadable ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no video stream found")]
    NoVideoStream,
}

/// Why a session group cannot be joined by stream copy
#[derive(Error, Debug)]
pub enum CompatibilityError {
    #[error("session has no files")]
    EmptyGroup,

    #[error("could not probe {}: {source}", .file.display())]
    Probe {
        file: PathBuf,
        #[source]
        source: ProbeError,
    },

    #[error("incompatible file {}: {found} vs {expected}", .file.display())]
    Mismatch {
        file: PathBuf,
        expected: StreamProfile,
        found: StreamProfile,
    },
}

/// Failure to produce the merged output of one session
#[derive(Error, Debug)]
pub enum JoinError {
    #[error("ffmpeg not found at {}", .0.display())]
    ToolNotFound(PathBuf),

    #[error("failed to start ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("could not write concat list {}: {source}", .path.display())]
    ConcatList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {} already exists", .0.display())]
    OutputExists(PathBuf),
}

/// Terminal failure for one session; the run continues with the next one
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("files are not compatible: {0}")]
    Incompatible(#[from] CompatibilityError),

    #[error("join failed: {0}")]
    Join(#[from] JoinError),
}
