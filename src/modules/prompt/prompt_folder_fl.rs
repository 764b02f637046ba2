use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

const PROMPT: &str =
    "Please enter the folder path containing GoPro MP4 files (e.g., C:\\Videos\\GoPro): ";

/// Ask for a folder until an existing directory is given.
pub fn prompt_for_folder<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<PathBuf> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a folder was entered");
        }

        let entered = clean_path_input(&line);
        if entered.is_empty() {
            writeln!(output, "Error: Folder path cannot be empty.")?;
            continue;
        }

        let folder = PathBuf::from(entered);
        if folder.is_dir() {
            return Ok(folder);
        }
        writeln!(
            output,
            "Error: '{}' is not a valid directory. Please try again.",
            entered
        )?;
    }
}

/// Trim whitespace and one pair of surrounding double quotes.
fn clean_path_input(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(trimmed)
}
