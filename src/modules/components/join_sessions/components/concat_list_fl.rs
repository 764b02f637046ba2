use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Quote a path for the concat demuxer. Inside single quotes everything is
/// literal, so a quote in the path closes the string, is escaped, and reopens.
pub fn quote_concat_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("'{}'", raw.replace('\'', r"'\''"))
}

/// Write one `file '<path>'` line per input, in order.
///
/// The demuxer reads the list line by line, so a path holding a line break
/// cannot be expressed and is rejected before anything is written.
pub fn write_concat_list(list_path: &Path, files: &[PathBuf]) -> io::Result<()> {
    if let Some(bad) = files
        .iter()
        .find(|path| path.to_string_lossy().contains(|c: char| c == '\n' || c == '\r'))
    {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("line break in path {:?}", bad),
        ));
    }

    let mut list_file = BufWriter::new(File::create(list_path)?);
    for path in files {
        writeln!(list_file, "file {}", quote_concat_path(path))?;
    }
    list_file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_single_quoted() {
        assert_eq!(
            quote_concat_path(Path::new("/videos/GX010001.MP4")),
            "'/videos/GX010001.MP4'"
        );
    }

    #[test]
    fn apostrophe_is_escaped() {
        assert_eq!(
            quote_concat_path(Path::new("/videos/Sam's trip/GX010001.MP4")),
            r"'/videos/Sam'\''s trip/GX010001.MP4'"
        );
    }

    #[test]
    fn line_breaks_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0001.txt");

        for bad in ["/v/a\nfile 'evil'/GX010001.MP4", "/v/a\r/GX010001.MP4"] {
            let files = vec![PathBuf::from("/v/GOPR0001.MP4"), PathBuf::from(bad)];
            let err = write_concat_list(&list_path, &files).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert!(!list_path.exists());
        }
    }

    #[test]
    fn writes_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("filelist_0001.txt");
        let files = vec![
            PathBuf::from("/videos/GOPR0001.MP4"),
            PathBuf::from("/videos/GX010001.MP4"),
        ];

        write_concat_list(&list_path, &files).unwrap();

        let written = std::fs::read_to_string(&list_path).unwrap();
        assert_eq!(
            written,
            "file '/videos/GOPR0001.MP4'\nfile '/videos/GX010001.MP4'\n"
        );
    }
}
