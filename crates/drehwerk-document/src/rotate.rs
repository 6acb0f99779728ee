// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rotation — open an existing document, set every page's /Rotate entry to
// an absolute value, and write the result as a sibling artifact using the
// `lopdf` crate.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

use drehwerk_core::error::{DrehwerkError, Result};
use drehwerk_core::paths;

/// Rotation applied to every page of every candidate file.
pub const BATCH_ROTATION_DEGREES: i32 = 180;

/// Rotates the pages of an existing PDF document.
///
/// Wraps `lopdf::Document`. Rotation is absolute: the page's existing
/// `/Rotate` value is discarded, never added to, so a second pass over an
/// already-rotated artifact stores the same value instead of doubling it.
pub struct PdfRotator {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfRotator {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();

        let document = Document::load(path_ref).map_err(|err| {
            DrehwerkError::DocumentLoad(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a rotator from raw PDF bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            DrehwerkError::DocumentLoad(format!("failed to load PDF from memory: {}", err))
        })?;

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Stored `/Rotate` value of a page (1-indexed); 0 when the key is absent.
    pub fn page_rotation(&self, page_number: u32) -> Result<i32> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            DrehwerkError::DocumentLoad(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let rotation = self
            .document
            .get_object(page_id)
            .ok()
            .and_then(|obj| match obj {
                Object::Dictionary(dict) => dict
                    .get(b"Rotate")
                    .ok()
                    .and_then(|r| r.as_i64().ok())
                    .map(|v| v as i32),
                _ => None,
            })
            .unwrap_or(0);

        Ok(rotation)
    }

    // -- Rotation ---------------------------------------------------------

    /// Set every page's `/Rotate` to `degrees` (must be a multiple of 90).
    ///
    /// The value is stored outright; the existing rotation state of each page
    /// is not consulted.
    #[instrument(skip(self), fields(degrees, pages = self.page_count()))]
    pub fn set_rotation_all(&mut self, degrees: i32) -> Result<()> {
        if degrees % 90 != 0 {
            return Err(DrehwerkError::Config(format!(
                "page rotation must be a multiple of 90, got {}",
                degrees
            )));
        }

        let normalized = degrees.rem_euclid(360);
        let page_ids: Vec<ObjectId> = self.document.get_pages().values().copied().collect();

        for page_id in page_ids {
            match self.document.get_object_mut(page_id) {
                Ok(Object::Dictionary(dict)) => {
                    dict.set("Rotate", Object::Integer(normalized as i64));
                }
                Ok(_) => warn!(?page_id, "page object is not a dictionary, skipping"),
                Err(err) => {
                    return Err(DrehwerkError::DocumentLoad(format!(
                        "cannot access page object {:?}: {}",
                        page_id, err
                    )));
                }
            }
        }

        info!(rotation = normalized, "rotation set on all pages");
        Ok(())
    }

    // -- Serialisation ----------------------------------------------------------

    /// Serialise the document and write it to `path`.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path_ref = path.as_ref();

        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            DrehwerkError::ArtifactWrite(format!("failed to serialise PDF: {}", err))
        })?;

        std::fs::write(path_ref, &output).map_err(|err| {
            DrehwerkError::ArtifactWrite(format!(
                "failed to write {}: {}",
                path_ref.display(),
                err
            ))
        })?;

        debug!(bytes = output.len(), "artifact written");
        Ok(())
    }
}

/// Rotate every page of `source` to 180° absolute and write the result as a
/// sibling artifact named `<stem>-rotated.pdf`.
///
/// The original file is never modified or deleted; the artifact path is
/// returned for the print step.
#[instrument(fields(source = %source.display()))]
pub fn rotate_file(source: &Path) -> Result<PathBuf> {
    let artifact = paths::rotated_artifact_path(source).ok_or_else(|| {
        DrehwerkError::ArtifactWrite(format!(
            "cannot derive artifact name for {}",
            source.display()
        ))
    })?;

    let mut rotator = PdfRotator::open(source)?;
    rotator.set_rotation_all(BATCH_ROTATION_DEGREES)?;
    rotator.save_to_file(&artifact)?;

    info!(
        artifact = %artifact.display(),
        pages = rotator.page_count(),
        "rotated artifact written"
    );
    Ok(artifact)
}
