// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Drehwerk.

use thiserror::Error;

/// Top-level error type for all Drehwerk operations.
#[derive(Debug, Error)]
pub enum DrehwerkError {
    // -- Document errors --
    #[error("failed to load PDF document: {0}")]
    DocumentLoad(String),

    #[error("failed to write rotated artifact: {0}")]
    ArtifactWrite(String),

    // -- Print errors --
    #[error("no printer selected")]
    NoPrinterSelected,

    #[error("print submission failed: {0}")]
    PrintSubmission(String),

    #[error("printer registry query failed: {0}")]
    PrinterRegistry(String),

    // -- Batch errors --
    #[error("file relocation failed: {0}")]
    Relocation(String),

    #[error("batch setup failed: {0}")]
    Batch(String),

    // -- Configuration / storage --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DrehwerkError>;
