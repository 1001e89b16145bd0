//! Training dataset reader
//!
//! CSV with a header row and `text`,`label` columns (label 0 or 1). Rows
//! with an unparseable label or empty text are skipped, never fatal: a
//! partially-dirty corpus still trains.

use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// One usable training row
#[derive(Debug, Clone)]
pub struct LabeledText {
    pub text: String,
    pub label: u8,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    text: String,
    label: String,
}

/// Read all usable rows from a labeled CSV.
pub fn read_labeled(path: &Path) -> EngineResult<Vec<LabeledText>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| EngineError::Dataset(format!("{}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<RawRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let label = match raw.label.trim().parse::<u8>() {
            Ok(l @ (0 | 1)) => l,
            _ => {
                skipped += 1;
                continue;
            }
        };
        if raw.text.trim().is_empty() {
            skipped += 1;
            continue;
        }
        rows.push(LabeledText { text: raw.text, label });
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed rows in {}", skipped, path.display());
    }
    log::info!("Read {} labeled rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_reads_valid_rows() {
        let (_dir, path) = write_csv("text,label\nshare otp now,1\nkal milte hain,0\n");
        let rows = read_labeled(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, 1);
        assert_eq!(rows[1].text, "kal milte hain");
    }

    #[test]
    fn test_skips_bad_label_and_empty_text() {
        let (_dir, path) = write_csv(
            "text,label\ngood row,1\n,1\nbad label,phish\nanother good,0\nout of range,7\n",
        );
        let rows = read_labeled(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "good row");
        assert_eq!(rows[1].text, "another good");
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let err = read_labeled(Path::new("/no/such/file.csv"));
        assert!(matches!(err, Err(EngineError::Dataset(_))));
    }

    #[test]
    fn test_handles_quoted_multilingual_text() {
        let (_dir, path) =
            write_csv("text,label\n\"Password share karo, turant!\",1\n\"তুমি কেমন আছো\",0\n");
        let rows = read_labeled(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].text.contains("turant"));
    }
}
