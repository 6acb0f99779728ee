// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate discovery — list the source directory and keep the PDF entries.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument, warn};

use drehwerk_core::error::{DrehwerkError, Result};
use drehwerk_core::paths;

/// A file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name within the source directory.
    pub file_name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// List `source_dir` and return its PDF candidates, sorted by file name.
///
/// Only regular files whose extension equals `pdf` case-insensitively
/// qualify. When `file_filter` is set, the result is restricted to that
/// exact file name.
#[instrument(skip_all, fields(source_dir = %source_dir.display()))]
pub async fn discover_candidates(
    source_dir: &Path,
    file_filter: Option<&str>,
) -> Result<Vec<Candidate>> {
    let mut entries = fs::read_dir(source_dir).await.map_err(|err| {
        DrehwerkError::Batch(format!(
            "cannot list source directory {}: {}",
            source_dir.display(),
            err
        ))
    })?;

    let mut candidates = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| DrehwerkError::Batch(format!("cannot read directory entry: {}", err)))?
    {
        let path = entry.path();
        if !paths::is_pdf(&path) {
            continue;
        }

        let file_type = entry.file_type().await.map_err(|err| {
            DrehwerkError::Batch(format!("cannot stat {}: {}", path.display(), err))
        })?;
        if !file_type.is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "skipping non-UTF-8 file name");
            continue;
        };

        if file_filter.is_some_and(|filter| filter != file_name) {
            continue;
        }

        candidates.push(Candidate { file_name, path });
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!(count = candidates.len(), "candidates discovered");
    Ok(candidates)
}
