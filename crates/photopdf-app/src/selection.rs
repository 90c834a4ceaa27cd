// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient selections: the photos picked for a new document and the saved
// documents picked for a merge.

use image::DynamicImage;
use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::types::DocumentId;
use photopdf_document::ImageProcessor;
use tracing::debug;

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Photos waiting to become a document, in page order.
#[derive(Debug, Clone, Default)]
pub struct GeneratorSelection {
    images: Vec<DynamicImage>,
}

impl GeneratorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, image: DynamicImage) {
        self.images.push(image);
    }

    /// Decode an encoded photo (JPEG, PNG, ...) and append it. Undecodable
    /// bytes leave the selection untouched.
    pub fn add_encoded(&mut self, bytes: &[u8]) -> Result<()> {
        let image = ImageProcessor::from_bytes(bytes)?.into_dynamic();
        self.images.push(image);
        Ok(())
    }

    /// Decode a batch of photos and append them all, or none if any fails
    /// to decode. Returns how many were added.
    pub fn add_all_encoded<B: AsRef<[u8]>>(&mut self, batch: &[B]) -> Result<usize> {
        let decoded = batch
            .iter()
            .map(|bytes| ImageProcessor::from_bytes(bytes.as_ref()).map(ImageProcessor::into_dynamic))
            .collect::<Result<Vec<_>>>()?;
        let added = decoded.len();
        self.images.extend(decoded);
        Ok(added)
    }

    /// Remove and return the photo at `index`.
    pub fn remove_image(&mut self, index: usize) -> Result<DynamicImage> {
        if index >= self.images.len() {
            return Err(PhotoPdfError::IndexOutOfRange {
                index,
                page_count: self.images.len(),
            });
        }
        Ok(self.images.remove(index))
    }

    pub fn clear_selection(&mut self) {
        debug!(dropped = self.images.len(), "Generator selection cleared");
        self.images.clear();
    }

    pub fn images(&self) -> &[DynamicImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Saved documents chosen for a merge, in the order they were first picked.
///
/// Picking a document that is already selected deselects it; picking it again
/// puts it at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSelection {
    ids: Vec<DocumentId>,
}

impl MergeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or deselect it if it was selected. Returns whether `id`
    /// is selected afterwards.
    pub fn toggle(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(position) => {
                self.ids.remove(position);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn is_selected(&self, id: DocumentId) -> bool {
        self.ids.contains(&id)
    }

    /// Zero-based merge position of `id`, for numbering badges in the list.
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.ids.iter().position(|selected| *selected == id)
    }

    pub fn ids(&self) -> &[DocumentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// A merge needs at least two documents.
    pub fn can_merge(&self) -> bool {
        self.ids.len() >= 2
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Forget `id` if it is selected, e.g. after the document was deleted.
    pub fn forget(&mut self, id: DocumentId) {
        self.ids.retain(|selected| *selected != id);
    }
}
