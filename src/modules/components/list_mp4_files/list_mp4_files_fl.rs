use std::fs;
use std::path::Path;

/// Camera files use an upper-case extension; matching is case-sensitive.
pub const MP4_EXTENSION: &str = "MP4";

/// Names of the regular `*.MP4` files directly inside `folder`, sorted.
pub fn list_mp4_files(folder: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(MP4_EXTENSION) {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => log::warn!("Skipping non UTF-8 filename: {:?}", name),
        }
    }

    names.sort();
    Ok(names)
}
