// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration, read from the process environment at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable naming the default source directory.
pub const ENV_SOURCE_DIRECTORY: &str = "SOURCE_DIRECTORY";
/// Environment variable naming the default destination directory.
pub const ENV_DESTINATION_DIRECTORY: &str = "DESTINATION_DIRECTORY";
/// Environment variable naming the default target printer.
pub const ENV_PRINTER_NAME: &str = "PRINTER_NAME";
/// Environment variable naming the HTTP listen port.
pub const ENV_PORT: &str = "PORT";

/// Listen port used when `PORT` is absent or unparseable.
const DEFAULT_PORT: u16 = 3000;

/// Process-wide settings.
///
/// Loaded once in `main` and passed explicitly into the pieces that need it;
/// nothing below the entry point reads the environment. Request fields may
/// override the directory and printer defaults per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default source directory for batches that do not name one.
    pub source_dir: Option<PathBuf>,
    /// Default destination directory for processed originals.
    pub destination_dir: Option<PathBuf>,
    /// Default target printer.
    pub printer: Option<String>,
    /// HTTP listen port (default 3000).
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            destination_dir: None,
            printer: None,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset, so `PRINTER_NAME=""` behaves the
    /// same as not exporting the variable at all.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            source_dir: var(ENV_SOURCE_DIRECTORY).map(PathBuf::from),
            destination_dir: var(ENV_DESTINATION_DIRECTORY).map(PathBuf::from),
            printer: var(ENV_PRINTER_NAME),
            port: var(ENV_PORT)
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
