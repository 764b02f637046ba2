use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::error::{CompatibilityError, JoinError, ProbeError, SessionError};
use crate::modules::components::check_compatibility::check_compatibility_fl::check_compatibility;
use crate::modules::components::group_files::group_files_fl::group_gopro_files;
use crate::modules::components::join_sessions::join_mp4_files_fl::{join_mp4_files, Ffmpeg, JoinVideos};
use crate::modules::components::list_mp4_files::list_mp4_files_fl::list_mp4_files;
use crate::modules::components::probe_video::probe_video_fl::{Ffprobe, ProbeVideo, StreamProfile};

/// The real external toolchain: ffprobe for inspection, ffmpeg for joining.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    pub ffprobe: Ffprobe,
    pub ffmpeg: Ffmpeg,
}

impl FfmpegTools {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ffprobe: Ffprobe::new(&config.ffprobe),
            ffmpeg: Ffmpeg::new(&config.ffmpeg),
        }
    }
}

impl ProbeVideo for FfmpegTools {
    fn probe_video(&self, path: &Path) -> Result<StreamProfile, ProbeError> {
        self.ffprobe.probe_video(path)
    }
}

impl JoinVideos for FfmpegTools {
    fn join_videos(&self, list_path: &Path, output_path: &Path) -> Result<(), JoinError> {
        self.ffmpeg.join_videos(list_path, output_path)
    }
}

/// What happened to one session
#[derive(Debug)]
pub enum SessionOutcome {
    Merged(PathBuf),
    Failed(SessionError),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Outputs written, in session order
    pub merged: Vec<PathBuf>,
    /// Session id and reason for every session that was not merged
    pub failed: Vec<(String, String)>,
    /// Filenames that did not look like camera recordings
    pub skipped_files: Vec<String>,
}

pub fn concat_list_path(folder: &Path, session: &str) -> PathBuf {
    folder.join(format!("filelist_{}.txt", session))
}

pub fn output_path(folder: &Path, output_prefix: &str, session: &str) -> PathBuf {
    folder.join(format!("{}_{}.mp4", output_prefix, session))
}

/// Merge the chapters of every recording session found in `folder`.
///
/// Sessions are handled one after another. A failing session is reported and
/// skipped; only an unreadable folder ends the run with an error.
pub fn process_gopro_folder<T>(folder: &Path, tools: &T, output_prefix: &str) -> Result<RunSummary>
where
    T: ProbeVideo + JoinVideos + ?Sized,
{
    let folder = std::path::absolute(folder)
        .with_context(|| format!("cannot resolve folder {}", folder.display()))?;
    let mut summary = RunSummary::default();

    let files = list_mp4_files(&folder)
        .with_context(|| format!("cannot list {}", folder.display()))?;
    if files.is_empty() {
        log::info!("No MP4 files found in {}.", folder.display());
        return Ok(summary);
    }

    let grouped = group_gopro_files(&files);
    summary.skipped_files = grouped.skipped;
    if grouped.sessions.is_empty() {
        log::info!("No valid GoPro files found.");
        return Ok(summary);
    }

    for (session, names) in &grouped.sessions {
        log::info!("Processing session {}: {:?}", session, names);
        let paths: Vec<PathBuf> = names.iter().map(|name| folder.join(name)).collect();

        match process_session(&folder, session, &paths, tools, output_prefix) {
            SessionOutcome::Merged(output) => summary.merged.push(output),
            SessionOutcome::Failed(e) => {
                log::log!(failure_level(&e), "Skipping session {}: {}", session, e);
                summary.failed.push((session.clone(), e.to_string()));
            }
        }
    }

    Ok(summary)
}

/// ffprobe/ffmpeg not starting or exiting non-zero is an error; any other
/// reason to skip a session is a warning.
pub fn failure_level(e: &SessionError) -> log::Level {
    match e {
        SessionError::Incompatible(CompatibilityError::Probe { source, .. }) => match source {
            ProbeError::ToolNotFound(_) | ProbeError::Spawn(_) | ProbeError::Failed { .. } => {
                log::Level::Error
            }
            ProbeError::Parse(_) | ProbeError::NoVideoStream => log::Level::Warn,
        },
        SessionError::Incompatible(_) => log::Level::Warn,
        SessionError::Join(JoinError::ToolNotFound(_) | JoinError::Spawn(_) | JoinError::Failed { .. }) => {
            log::Level::Error
        }
        SessionError::Join(JoinError::ConcatList { .. } | JoinError::OutputExists(_)) => log::Level::Warn,
    }
}

/// Check, list and join one session. Nothing is retried.
pub fn process_session<T>(
    folder: &Path,
    session: &str,
    paths: &[PathBuf],
    tools: &T,
    output_prefix: &str,
) -> SessionOutcome
where
    T: ProbeVideo + JoinVideos + ?Sized,
{
    let profile = match check_compatibility(paths, tools) {
        Ok(profile) => profile,
        Err(e) => return SessionOutcome::Failed(e.into()),
    };
    log::debug!("Session {} streams: {}", session, profile);

    let list_path = concat_list_path(folder, session);
    let output = output_path(folder, output_prefix, session);
    match join_mp4_files(tools, paths, &list_path, &output) {
        Ok(()) => SessionOutcome::Merged(output),
        Err(e) => SessionOutcome::Failed(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_session() {
        let folder = Path::new("/videos");
        assert_eq!(
            concat_list_path(folder, "0042"),
            PathBuf::from("/videos/filelist_0042.txt")
        );
        assert_eq!(
            output_path(folder, "output", "0042"),
            PathBuf::from("/videos/output_0042.mp4")
        );
    }

    fn profile(width: u32) -> StreamProfile {
        StreamProfile {
            codec_name: "h264".into(),
            width,
            height: 1080,
            r_frame_rate: "30/1".into(),
        }
    }

    #[test]
    fn skipped_sessions_warn_and_tool_failures_error() {
        let mismatch = SessionError::Incompatible(CompatibilityError::Mismatch {
            file: PathBuf::from("GX020001.MP4"),
            expected: profile(1920),
            found: profile(1280),
        });
        assert_eq!(failure_level(&mismatch), log::Level::Warn);

        let no_stream = SessionError::Incompatible(CompatibilityError::Probe {
            file: PathBuf::from("GX010001.MP4"),
            source: ProbeError::NoVideoStream,
        });
        assert_eq!(failure_level(&no_stream), log::Level::Warn);

        let exists = SessionError::Join(JoinError::OutputExists(PathBuf::from("output_0001.mp4")));
        assert_eq!(failure_level(&exists), log::Level::Warn);

        let no_ffprobe = SessionError::Incompatible(CompatibilityError::Probe {
            file: PathBuf::from("GX010001.MP4"),
            source: ProbeError::ToolNotFound(PathBuf::from("ffprobe")),
        });
        assert_eq!(failure_level(&no_ffprobe), log::Level::Error);

        let no_ffmpeg = SessionError::Join(JoinError::ToolNotFound(PathBuf::from("ffmpeg")));
        assert_eq!(failure_level(&no_ffmpeg), log::Level::Error);
    }
}
