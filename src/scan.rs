//! Input directory scanning

use std::fs;
use std::path::{Path, PathBuf};
use lopdf::Document;
use tracing::debug;
use crate::error::{Error, Result};

/// Check whether a file parses as a PDF document
pub fn is_valid_pdf(path: &Path) -> bool {
    Document::load(path).is_ok()
}

/// Collect every file in `dir` that parses as a PDF
///
/// Sub-directories and files that fail to parse are skipped without a
/// diagnostic. The result keeps the order of the directory listing, which
/// is platform dependent; no sorting is applied.
pub fn collect_valid_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::InputDirNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        if is_valid_pdf(&path) {
            pdfs.push(path);
        } else {
            debug!("Skipping non-PDF entry {}", path.display());
        }
    }

    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_nonexistent_dir() {
        let result = collect_valid_pdfs(Path::new("nonexistent-invoice-dir"));
        assert!(matches!(result.unwrap_err(), Error::InputDirNotFound(_)));
    }

    #[test]
    fn test_collect_rejects_file_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = collect_valid_pdfs(&file);
        assert!(matches!(result.unwrap_err(), Error::NotADirectory(_)));
    }

    #[test]
    fn test_is_valid_pdf_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("fake.pdf");
        fs::write(&fake, b"just some text with a pdf extension").unwrap();

        assert!(!is_valid_pdf(&fake));
        assert!(!is_valid_pdf(&dir.path().join("missing.pdf")));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_unreadable_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), dir.path().join("dangling.pdf")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();

        let found = collect_valid_pdfs(dir.path()).unwrap();
        assert!(found.is_empty());
    }

    // Scanning over real PDFs is covered in tests/integration.rs
}
