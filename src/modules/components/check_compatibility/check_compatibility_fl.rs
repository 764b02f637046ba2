use std::path::{Path, PathBuf};

use crate::error::CompatibilityError;
use crate::modules::components::probe_video::probe_video_fl::{ProbeVideo, StreamProfile};

/// Verify that every file shares the first file's codec, resolution and frame
/// rate. Stops at the first probe failure or mismatch.
pub fn check_compatibility<P: ProbeVideo + ?Sized>(
    files: &[PathBuf],
    prober: &P,
) -> Result<StreamProfile, CompatibilityError> {
    let (first, rest) = files.split_first().ok_or(CompatibilityError::EmptyGroup)?;

    let expected = probe(first, prober)?;
    // A single file has nothing to be compared against
    for file in rest {
        let found = probe(file, prober)?;
        if found != expected {
            return Err(CompatibilityError::Mismatch {
                file: file.clone(),
                expected,
                found,
            });
        }
    }

    Ok(expected)
}

fn probe<P: ProbeVideo + ?Sized>(file: &Path, prober: &P) -> Result<StreamProfile, CompatibilityError> {
    prober
        .probe_video(file)
        .map_err(|source| CompatibilityError::Probe {
            file: file.to_path_buf(),
            source,
        })
}
