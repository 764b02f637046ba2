use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::JoinError;
use crate::modules::components::join_sessions::components::concat_list_fl::write_concat_list;

/// Joins the files named in a concat list into one output without re-encoding.
pub trait JoinVideos {
    fn join_videos(&self, list_path: &Path, output_path: &Path) -> Result<(), JoinError>;
}

/// ffmpeg-backed joiner
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    pub exe: PathBuf,
}

impl Ffmpeg {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }
}

impl JoinVideos for Ffmpeg {
    fn join_videos(&self, list_path: &Path, output_path: &Path) -> Result<(), JoinError> {
        let mut cmd = Command::new(&self.exe);
        cmd.args(["-hide_banner", "-nostdin", "-n"])
            // Chapter files restart their timestamps, regenerate them
            .args(["-fflags", "+genpts"])
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(list_path)
            .args(["-c", "copy"])
            .arg(output_path);
        log::debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => JoinError::ToolNotFound(self.exe.clone()),
            _ => JoinError::Spawn(e),
        })?;

        if !output.status.success() {
            return Err(JoinError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Join `mp4_paths` in order into `output_path`, using a concat list at
/// `list_path`. The list is removed on success and kept on failure.
/// A partially written output is not cleaned up.
pub fn join_mp4_files<J: JoinVideos + ?Sized>(
    joiner: &J,
    mp4_paths: &[PathBuf],
    list_path: &Path,
    output_path: &Path,
) -> Result<(), JoinError> {
    if output_path.exists() {
        return Err(JoinError::OutputExists(output_path.to_path_buf()));
    }

    write_concat_list(list_path, mp4_paths).map_err(|source| JoinError::ConcatList {
        path: list_path.to_path_buf(),
        source,
    })?;

    joiner.join_videos(list_path, output_path)?;

    if let Err(e) = fs::remove_file(list_path) {
        log::warn!("Failed to delete concat list {}: {}", list_path.display(), e);
    }

    log::info!("✅ Joined video created at: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingJoiner {
        fail: bool,
        lists: RefCell<Vec<String>>,
    }

    impl JoinVideos for RecordingJoiner {
        fn join_videos(&self, list_path: &Path, output_path: &Path) -> Result<(), JoinError> {
            self.lists
                .borrow_mut()
                .push(fs::read_to_string(list_path).unwrap());
            if self.fail {
                return Err(JoinError::ToolNotFound(PathBuf::from("ffmpeg")));
            }
            fs::write(output_path, b"joined").unwrap();
            Ok(())
        }
    }

    #[test]
    fn success_removes_concat_list() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0001.txt");
        let output_path = dir.path().join("output_0001.mp4");
        let inputs = vec![dir.path().join("GOPR0001.MP4"), dir.path().join("GX010001.MP4")];
        let joiner = RecordingJoiner::default();

        join_mp4_files(&joiner, &inputs, &list_path, &output_path).unwrap();

        assert!(output_path.exists());
        assert!(!list_path.exists());
        let lists = joiner.lists.borrow();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].lines().count(), 2);
        assert!(lists[0].lines().next().unwrap().ends_with("GOPR0001.MP4'"));
    }

    #[test]
    fn failure_keeps_concat_list() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0002.txt");
        let output_path = dir.path().join("output_0002.mp4");
        let joiner = RecordingJoiner {
            fail: true,
            ..Default::default()
        };

        let result = join_mp4_files(&joiner, &[dir.path().join("GH020002.MP4")], &list_path, &output_path);

        assert!(matches!(result, Err(JoinError::ToolNotFound(_))));
        assert!(list_path.exists());
        assert!(!output_path.exists());
    }

    #[test]
    fn existing_output_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0003.txt");
        let output_path = dir.path().join("output_0003.mp4");
        fs::write(&output_path, b"previous run").unwrap();
        let joiner = RecordingJoiner::default();

        let result = join_mp4_files(&joiner, &[dir.path().join("GX010003.MP4")], &list_path, &output_path);

        assert!(matches!(result, Err(JoinError::OutputExists(_))));
        assert!(joiner.lists.borrow().is_empty());
        assert_eq!(fs::read(&output_path).unwrap(), b"previous run");
    }

    #[test]
    fn line_break_in_folder_fails_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0005.txt");
        let output_path = dir.path().join("output_0005.mp4");
        let inputs = vec![PathBuf::from("/v/a\nfile 'evil'/GX010005.MP4")];
        let joiner = RecordingJoiner::default();

        let result = join_mp4_files(&joiner, &inputs, &list_path, &output_path);

        assert!(matches!(result, Err(JoinError::ConcatList { .. })));
        assert!(joiner.lists.borrow().is_empty());
        assert!(!list_path.exists());
    }

    #[test]
    fn missing_ffmpeg_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = Ffmpeg::new(dir.path().join("no-ffmpeg-here"));
        let list_path = dir.path().join("filelist_0004.txt");
        fs::write(&list_path, b"").unwrap();

        assert!(matches!(
            ffmpeg.join_videos(&list_path, &dir.path().join("output_0004.mp4")),
            Err(JoinError::ToolNotFound(_))
        ));
    }
}
