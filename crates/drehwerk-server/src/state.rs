// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared handler state.

use std::sync::Arc;

use drehwerk_core::AppConfig;
use drehwerk_print::{CupsSpooler, Spooler};

/// State handed to every request handler.
///
/// Carries the startup configuration and the spooler implementation; handlers
/// build a fresh batch runner per request on top of these.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub spooler: Arc<dyn Spooler>,
}

impl AppState {
    /// Production state, printing through CUPS.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            spooler: Arc::new(CupsSpooler::new()),
        }
    }
}
