// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drehwerk-document — PDF rotation for the Drehwerk batch processor.
//
// Provides absolute page rotation over `lopdf` documents and the
// rotated-artifact writer used by the batch pipeline.

pub mod rotate;

pub use rotate::{BATCH_ROTATION_DEGREES, PdfRotator, rotate_file};
