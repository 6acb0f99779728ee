// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extension-aware path derivation for candidate files.
//
// Derived names are built from the parsed (stem, extension) pair rather than
// substring replacement, so an uppercase `REPORT.PDF` still derives
// `REPORT-rotated.pdf` and `REPORT-processed.pdf`.

use std::path::{Path, PathBuf};

/// Suffix appended to a stem for the intermediate rotated artifact.
pub const ROTATED_SUFFIX: &str = "-rotated";
/// Suffix appended to a stem when the original moves to the destination.
pub const PROCESSED_SUFFIX: &str = "-processed";
/// Canonical lowercase extension used for derived file names.
const PDF_EXTENSION: &str = "pdf";

/// True when the path's extension equals `pdf`, matched case-insensitively.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// `<stem><suffix>.pdf`, or `None` when the path has no UTF-8 stem.
fn derived_name(path: &Path, suffix: &str) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(format!("{stem}{suffix}.{PDF_EXTENSION}"))
}

/// Path of the rotated artifact, written next to `source`.
pub fn rotated_artifact_path(source: &Path) -> Option<PathBuf> {
    derived_name(source, ROTATED_SUFFIX).map(|name| source.with_file_name(name))
}

/// File name the original takes in the destination directory.
pub fn processed_file_name(source: &Path) -> Option<String> {
    derived_name(source, PROCESSED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_pdf_extension_case_insensitively() {
        assert!(is_pdf(Path::new("a.pdf")));
        assert!(is_pdf(Path::new("REPORT.PDF")));
        assert!(is_pdf(Path::new("mixed.Pdf")));
        assert!(!is_pdf(Path::new("notes.txt")));
        assert!(!is_pdf(Path::new("no_extension")));
        assert!(!is_pdf(Path::new("archive.pdf.bak")));
    }

    #[test]
    fn derives_artifact_path_next_to_source() {
        let artifact = rotated_artifact_path(Path::new("/in/a.pdf")).unwrap();
        assert_eq!(artifact, PathBuf::from("/in/a-rotated.pdf"));
    }

    #[test]
    fn uppercase_extension_derives_lowercase_names() {
        let artifact = rotated_artifact_path(Path::new("/in/REPORT.PDF")).unwrap();
        assert_eq!(artifact, PathBuf::from("/in/REPORT-rotated.pdf"));

        let name = processed_file_name(Path::new("/in/REPORT.PDF")).unwrap();
        assert_eq!(name, "REPORT-processed.pdf");
    }

    #[test]
    fn only_last_extension_is_stripped() {
        let name = processed_file_name(Path::new("/in/archive.v2.pdf")).unwrap();
        assert_eq!(name, "archive.v2-processed.pdf");
    }

    #[test]
    fn processed_name_excludes_directories() {
        let name = processed_file_name(Path::new("/deep/nested/b.pdf")).unwrap();
        assert_eq!(name, "b-processed.pdf");
    }
}
