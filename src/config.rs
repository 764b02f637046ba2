//! Runtime configuration
//!
//! Locations of the external tools and the output naming are resolved once at
//! startup and handed to the components that need them.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const FFMPEG_ENV: &str = "GOPRO_MERGE_FFMPEG";
pub const FFPROBE_ENV: &str = "GOPRO_MERGE_FFPROBE";
pub const OUTPUT_PREFIX_ENV: &str = "GOPRO_MERGE_OUTPUT_PREFIX";

pub const DEFAULT_OUTPUT_PREFIX: &str = "output";

/// Directory next to the executable holding bundled tools
const BUNDLED_TOOLS_DIR: &str = "bin";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// ffmpeg executable used for stream-copy concatenation
    pub ffmpeg: PathBuf,

    /// ffprobe executable used to read stream attributes
    pub ffprobe: PathBuf,

    /// Outputs are named `<output_prefix>_<session>.mp4`
    pub output_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(executable_name("ffmpeg")),
            ffprobe: PathBuf::from(executable_name("ffprobe")),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment overrides and bundled tools.
    pub fn from_env() -> Self {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let output_prefix = env::var(OUTPUT_PREFIX_ENV)
            .ok()
            .map(|prefix| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string());

        Self {
            ffmpeg: resolve_tool("ffmpeg", env::var_os(FFMPEG_ENV), exe_dir.as_deref()),
            ffprobe: resolve_tool("ffprobe", env::var_os(FFPROBE_ENV), exe_dir.as_deref()),
            output_prefix,
        }
    }

    /// Warn about tools that cannot be started. Missing tools are not fatal here,
    /// every probe or join that needs them fails on its own.
    pub fn check_tools(&self) {
        for tool in [&self.ffprobe, &self.ffmpeg] {
            match tool_available(tool) {
                Ok(()) => log::debug!("Found {}", tool.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::warn!("{} not found, sessions needing it will be skipped", tool.display())
                }
                Err(e) => log::warn!("Could not start {}: {}", tool.display(), e),
            }
        }
    }
}

/// Pick the executable for `name`: explicit override, then the bundled copy in
/// `<exe_dir>/bin`, then the bare name looked up on the search path.
pub fn resolve_tool(name: &str, override_path: Option<OsString>, exe_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let file_name = executable_name(name);
    if let Some(dir) = exe_dir {
        let bundled = dir.join(BUNDLED_TOOLS_DIR).join(&file_name);
        if bundled.is_file() {
            return bundled;
        }
    }

    PathBuf::from(file_name)
}

fn executable_name(name: &str) -> String {
    format!("{}{}", name, env::consts::EXE_SUFFIX)
}

fn tool_available(tool: &Path) -> io::Result<()> {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|_| ())
}
