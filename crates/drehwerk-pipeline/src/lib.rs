// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drehwerk-pipeline — the batch engine: candidate discovery, per-file
// rotate → print → relocate sequencing, and outcome reporting.

pub mod batch;
pub mod discover;
pub mod relocate;

pub use batch::{BatchRequest, BatchRunner};
pub use discover::Candidate;
