use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::error::ProbeError;

/// Attributes of a file's first video stream that must agree for stream copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamProfile {
    pub codec_name: String,
    pub width: u32,
    pub height: u32,
    /// Frame rate as reported, e.g. `30000/1001`. Compared verbatim.
    pub r_frame_rate: String,
}

impl fmt::Display for StreamProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} @ {}",
            self.codec_name, self.width, self.height, self.r_frame_rate
        )
    }
}

/// Reads the stream attributes of a video file.
pub trait ProbeVideo {
    fn probe_video(&self, path: &Path) -> Result<StreamProfile, ProbeError>;
}

/// ffprobe-backed prober
#[derive(Debug, Clone)]
pub struct Ffprobe {
    pub exe: PathBuf,
}

impl Ffprobe {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }
}

impl ProbeVideo for Ffprobe {
    fn probe_video(&self, path: &Path) -> Result<StreamProfile, ProbeError> {
        log::debug!("Probing {} with {}", path.display(), self.exe.display());

        let output = Command::new(&self.exe)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=codec_name,width,height,r_frame_rate",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ProbeError::ToolNotFound(self.exe.clone()),
                _ => ProbeError::Spawn(e),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_probe_output(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamProfile>,
}

/// Decode ffprobe's JSON and take the first (only) selected stream.
pub fn parse_probe_output(stdout: &[u8]) -> Result<StreamProfile, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)?;
    parsed
        .streams
        .into_iter()
        .next()
        .ok_or(ProbeError::NoVideoStream)
}
