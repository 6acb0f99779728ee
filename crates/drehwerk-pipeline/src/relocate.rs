// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File relocation — move a printed original into the destination directory.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument};

use drehwerk_core::error::{DrehwerkError, Result};

/// Move `source` into `destination_dir` under `new_name`.
///
/// Uses a plain rename: atomic within one filesystem, and it fails across
/// devices rather than degrading to copy-and-delete. Overwrite semantics are
/// whatever the filesystem does on rename.
#[instrument(skip_all, fields(source = %source.display(), new_name))]
pub async fn relocate(source: &Path, destination_dir: &Path, new_name: &str) -> Result<PathBuf> {
    let target = destination_dir.join(new_name);

    fs::rename(source, &target).await.map_err(|err| {
        DrehwerkError::Relocation(format!(
            "cannot move {} to {}: {}",
            source.display(),
            target.display(),
            err
        ))
    })?;

    debug!(target = %target.display(), "original relocated");
    Ok(target)
}
