// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// photopdf-document: Document processing for PhotoPDF.
//
// Turns images into PDF documents, deletes and reorders pages, concatenates
// stored documents, and renders page thumbnails. All operations are pure
// functions of their inputs; persistence lives in photopdf-store.

pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `photopdf_document::DocumentBuilder` etc.
pub use crate::image::processor::ImageProcessor;
pub use crate::pdf::builder::DocumentBuilder;
pub use crate::pdf::document::Document;
pub use crate::pdf::editor::{DocumentEditor, PageCursor};
pub use crate::pdf::merger::{DocumentMerger, MergeOutcome, SkippedSource};
pub use crate::pdf::pages::{Page, PageBox, PageCollection};
pub use crate::pdf::thumbnail::ThumbnailRenderer;
