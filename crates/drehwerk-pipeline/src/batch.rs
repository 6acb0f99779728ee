// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch orchestration — drive each candidate file through rotate, print, and
// relocate, isolating failures per file.
//
// One bad file never stops the batch: every step failure is captured in that
// file's outcome and iteration moves on. Only setup (resolving and listing
// the source directory) can fail the batch as a whole.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, instrument, warn};

use drehwerk_core::error::{DrehwerkError, Result};
use drehwerk_core::{
    BatchId, BatchReport, Disposition, FileOutcome, MediaSize, PipelineStep, paths,
};
use drehwerk_document::rotate_file;
use drehwerk_print::Spooler;

use crate::discover::{Candidate, discover_candidates};
use crate::relocate::relocate;

/// One batch invocation: where to read, where to move, what to print on.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub printer: String,
    /// Restrict the batch to this exact file name.
    pub file_filter: Option<String>,
}

/// Drives candidate files through the pipeline one at a time.
pub struct BatchRunner<S> {
    spooler: S,
    media: MediaSize,
}

impl<S: Spooler> BatchRunner<S> {
    /// A runner printing on the fixed label stock.
    pub fn new(spooler: S) -> Self {
        Self {
            spooler,
            media: MediaSize::LABEL_100X50,
        }
    }

    /// Process every candidate in the request's source directory.
    ///
    /// Files are handled strictly in sequence; there is no parallelism
    /// across files or across the steps within a file.
    #[instrument(skip_all, fields(printer = %request.printer))]
    pub async fn run(&self, request: &BatchRequest) -> Result<BatchReport> {
        let batch_id = BatchId::new();
        let started_at = Utc::now();

        let source_dir = resolve_source_dir(&request.source_dir)?;
        let destination_dir = absolutize(&request.destination_dir)?;

        let candidates =
            discover_candidates(&source_dir, request.file_filter.as_deref()).await?;
        info!(%batch_id, candidates = candidates.len(), "batch started");

        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let outcome = self
                .process_file(candidate, &destination_dir, &request.printer)
                .await;
            if let Disposition::Failed { step, reason } = &outcome.disposition {
                warn!(file = %candidate.file_name, step = %step, reason = %reason, "file failed");
            }
            outcomes.push(outcome);
        }

        let report = BatchReport::new(batch_id, &request.printer, started_at, outcomes);
        info!(
            %batch_id,
            processed = report.processed,
            failed = report.failed,
            "batch finished"
        );
        Ok(report)
    }

    /// Rotate, print, and relocate one candidate.
    async fn process_file(
        &self,
        candidate: &Candidate,
        destination_dir: &Path,
        printer: &str,
    ) -> FileOutcome {
        // Rotation is CPU-bound lopdf work; run it off the async runtime.
        let source = candidate.path.clone();
        let rotated = match tokio::task::spawn_blocking(move || rotate_file(&source)).await {
            Ok(Ok(artifact)) => artifact,
            Ok(Err(err)) => {
                return FileOutcome::failed(
                    &candidate.file_name,
                    PipelineStep::Rotate,
                    err.to_string(),
                );
            }
            Err(err) => {
                return FileOutcome::failed(
                    &candidate.file_name,
                    PipelineStep::Rotate,
                    format!("rotation task failed: {err}"),
                );
            }
        };

        if let Err(err) = self.spooler.submit(&rotated, printer, self.media).await {
            return FileOutcome::failed(&candidate.file_name, PipelineStep::Print, err.to_string());
        }

        let Some(new_name) = paths::processed_file_name(&candidate.path) else {
            return FileOutcome::failed(
                &candidate.file_name,
                PipelineStep::Relocate,
                format!("cannot derive processed name for {}", candidate.path.display()),
            );
        };

        let moved_to = match relocate(&candidate.path, destination_dir, &new_name).await {
            Ok(target) => target,
            Err(err) => {
                return FileOutcome::failed(
                    &candidate.file_name,
                    PipelineStep::Relocate,
                    err.to_string(),
                );
            }
        };

        // The artifact has served its purpose once the original is moved.
        if let Err(err) = tokio::fs::remove_file(&rotated).await {
            warn!(artifact = %rotated.display(), %err, "could not remove rotated artifact");
        }

        FileOutcome::processed(&candidate.file_name, moved_to)
    }
}

/// Canonicalise the source directory; it must exist.
fn resolve_source_dir(dir: &Path) -> Result<PathBuf> {
    dir.canonicalize().map_err(|err| {
        DrehwerkError::Batch(format!(
            "cannot resolve source directory {}: {}",
            dir.display(),
            err
        ))
    })
}

/// Make the destination absolute without requiring it to exist; a missing
/// destination shows up later as a per-file relocation failure.
fn absolutize(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).map_err(|err| {
        DrehwerkError::Batch(format!(
            "cannot resolve destination directory {}: {}",
            dir.display(),
            err
        ))
    })
}
