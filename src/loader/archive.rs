//! Pulling the thesaurus data file out of a zip archive.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Result, ThesaurizeError};

/// Return the contents of the first file in the zip archive `bytes` whose name
/// ends with `suffix`.
pub fn extract_data_file(bytes: &[u8], suffix: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ThesaurizeError::format(format!("not a zip archive: {e}")))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ThesaurizeError::format(format!("cannot read archive entry {i}: {e}")))?;
        if file.is_dir() || !file.name().ends_with(suffix) {
            continue;
        }

        log::info!("Found thesaurus data file {}", file.name());
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        return Ok(content);
    }

    Err(ThesaurizeError::format(format!(
        "no file ending in '{suffix}' in archive"
    )))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_first_match() {
        let bytes = archive(&[
            ("README_th_en_US_v2.txt", "readme"),
            ("th_en_US_v2.dat", "ISO8859-1\n"),
            ("th_en_GB.dat", "other"),
        ]);

        assert_eq!(extract_data_file(&bytes, ".dat").unwrap(), b"ISO8859-1\n");
    }

    #[test]
    fn test_missing_data_file() {
        let bytes = archive(&[("th_en_US_v2.idx", "index")]);
        let result = extract_data_file(&bytes, ".dat");
        assert!(matches!(result, Err(ThesaurizeError::Format(_))));
    }

    #[test]
    fn test_not_a_zip() {
        let result = extract_data_file(b"plain text", ".dat");
        assert!(matches!(result, Err(ThesaurizeError::Format(_))));
    }
}
