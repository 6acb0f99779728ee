// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer registry — enumerate the destinations the host spooler knows about.
//
// `lpstat -e` prints one destination name per line. Parsing is a separate
// function because exercising the real command needs a live spooler; the
// tests cover the parsing only.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use drehwerk_core::error::{DrehwerkError, Result};

/// Spooler status binary used for enumeration.
const LPSTAT_BINARY: &str = "lpstat";

/// Query the host spooler for installed printer names.
#[instrument]
pub async fn installed_printers() -> Result<Vec<String>> {
    let output = Command::new(LPSTAT_BINARY)
        .arg("-e")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|err| {
            DrehwerkError::PrinterRegistry(format!("failed to run {}: {}", LPSTAT_BINARY, err))
        })?;

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map_or_else(|| "unknown".to_string(), |c| c.to_string());
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DrehwerkError::PrinterRegistry(format!(
            "{} failed (exit code {}): {}",
            LPSTAT_BINARY,
            code,
            stderr.trim()
        )));
    }

    let printers = parse_printer_names(&String::from_utf8_lossy(&output.stdout));
    debug!(count = printers.len(), "printer registry queried");
    Ok(printers)
}

/// Extract printer names from spooler listing output.
///
/// Lines are trimmed; blank lines and column-header lines are dropped.
fn parse_printer_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case("name"))
        .map(str::to_string)
        .collect()
}
