// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drehwerk-print — host spooler integration for Drehwerk: print submission
// via `lp` and printer enumeration via `lpstat`. This crate bridges between
// the core domain types in `drehwerk-core` and the actual print subsystem.

pub mod registry;
pub mod spooler;

pub use registry::installed_printers;
pub use spooler::{CupsSpooler, Spooler};
