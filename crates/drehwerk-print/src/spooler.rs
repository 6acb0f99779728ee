// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print submission through the host spooler.
//
// The production path shells out to CUPS `lp`: the rotated artifact is handed
// to the spooler and the call returns once the job is accepted. Acceptance is
// not completion — the spooler owns the job from there.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use drehwerk_core::MediaSize;
use drehwerk_core::error::{DrehwerkError, Result};

/// Spooler binary used for submission.
const LP_BINARY: &str = "lp";

/// Timeout for one submission call.
const SUBMIT_TIMEOUT_SECS: u64 = 60;

/// Submits prepared artifacts to a named printer.
#[async_trait]
pub trait Spooler: Send + Sync {
    /// Submit `document` to `printer` on the given media.
    ///
    /// Returns once the job is accepted by the spooler; completion of the
    /// physical print is not tracked.
    async fn submit(&self, document: &Path, printer: &str, media: MediaSize) -> Result<()>;
}

#[async_trait]
impl<S: Spooler + ?Sized> Spooler for Arc<S> {
    async fn submit(&self, document: &Path, printer: &str, media: MediaSize) -> Result<()> {
        (**self).submit(document, printer, media).await
    }
}

/// CUPS-backed spooler client.
#[derive(Debug, Clone, Copy, Default)]
pub struct CupsSpooler;

impl CupsSpooler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Spooler for CupsSpooler {
    #[instrument(skip_all, fields(document = %document.display(), printer))]
    async fn submit(&self, document: &Path, printer: &str, media: MediaSize) -> Result<()> {
        if printer.trim().is_empty() {
            return Err(DrehwerkError::NoPrinterSelected);
        }

        let args = submit_args(document, printer, media);
        debug!(?args, "invoking {}", LP_BINARY);

        let output = tokio::time::timeout(
            Duration::from_secs(SUBMIT_TIMEOUT_SECS),
            Command::new(LP_BINARY)
                .args(&args)
                .stdin(Stdio::null())
                .output(),
        )
        .await
        .map_err(|_| {
            DrehwerkError::PrintSubmission(format!(
                "{} timed out after {}s",
                LP_BINARY, SUBMIT_TIMEOUT_SECS
            ))
        })?
        .map_err(|err| {
            DrehwerkError::PrintSubmission(format!("failed to run {}: {}", LP_BINARY, err))
        })?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "unknown".to_string(), |c| c.to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DrehwerkError::PrintSubmission(format!(
                "{} failed (exit code {}): {}",
                LP_BINARY,
                code,
                stderr.trim()
            )));
        }

        info!(printer, "job accepted by spooler");
        Ok(())
    }
}

/// Argument list for the `lp` invocation.
///
/// Kept separate from the subprocess plumbing so the exact flags can be
/// checked without a live spooler.
fn submit_args(document: &Path, printer: &str, media: MediaSize) -> Vec<String> {
    vec![
        "-d".to_string(),
        printer.to_string(),
        "-o".to_string(),
        format!("media={}", media.cups_media_option()),
        document.display().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_name_printer_and_fixed_media() {
        let args = submit_args(
            Path::new("/in/a-rotated.pdf"),
            "LabelPrinter",
            MediaSize::LABEL_100X50,
        );
        assert_eq!(
            args,
            vec![
                "-d",
                "LabelPrinter",
                "-o",
                "media=Custom.100x50mm",
                "/in/a-rotated.pdf",
            ]
        );
    }

    #[tokio::test]
    async fn blank_printer_name_is_rejected_before_spawning() {
        let err = CupsSpooler::new()
            .submit(Path::new("/in/a-rotated.pdf"), "   ", MediaSize::LABEL_100X50)
            .await
            .expect_err("blank name must be rejected");
        assert!(matches!(err, DrehwerkError::NoPrinterSelected));
    }
}
