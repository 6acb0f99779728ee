// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Drehwerk batch processor.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical media dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSize {
    pub width_mm: u32,
    pub height_mm: u32,
}

impl MediaSize {
    /// The label stock every batch prints on.
    pub const LABEL_100X50: Self = Self {
        width_mm: 100,
        height_mm: 50,
    };

    /// CUPS `media` option value for a custom size, e.g. `Custom.100x50mm`.
    pub fn cups_media_option(&self) -> String {
        format!("Custom.{}x{}mm", self.width_mm, self.height_mm)
    }
}

/// Pipeline stage a candidate file moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    /// Load the PDF and write the rotated artifact.
    Rotate,
    /// Submit the artifact to the spooler.
    Print,
    /// Move the original into the destination directory.
    Relocate,
}

impl PipelineStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Print => "print",
            Self::Relocate => "relocate",
        }
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one candidate file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Disposition {
    /// Rotated, printed, and moved into the destination directory.
    Processed { moved_to: PathBuf },
    /// Stopped at `step`; the original file stays in the source directory.
    Failed { step: PipelineStep, reason: String },
}

impl Disposition {
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }
}

/// Per-file result collected by the batch orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// File name within the source directory.
    pub file_name: String,
    pub disposition: Disposition,
}

impl FileOutcome {
    pub fn processed(file_name: impl Into<String>, moved_to: PathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            disposition: Disposition::Processed { moved_to },
        }
    }

    pub fn failed(file_name: impl Into<String>, step: PipelineStep, reason: String) -> Self {
        Self {
            file_name: file_name.into(),
            disposition: Disposition::Failed { step, reason },
        }
    }
}

/// Aggregate result of one batch run.
///
/// One entry per candidate file, in processing order, plus derived counts.
/// A batch with failures still completes; the report is how the caller
/// learns which files need attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: BatchId,
    /// Printer the batch was submitted to.
    pub printer: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Files that made it through rotate, print, and relocate.
    pub processed: usize,
    /// Files that stopped at some step.
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Assemble the report for a finished batch.
    pub fn new(
        batch_id: BatchId,
        printer: impl Into<String>,
        started_at: DateTime<Utc>,
        outcomes: Vec<FileOutcome>,
    ) -> Self {
        let processed = outcomes
            .iter()
            .filter(|o| o.disposition.is_processed())
            .count();
        let failed = outcomes.len() - processed;
        Self {
            batch_id,
            printer: printer.into(),
            started_at,
            finished_at: Utc::now(),
            processed,
            failed,
            outcomes,
        }
    }

    /// True when every candidate file was fully processed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
