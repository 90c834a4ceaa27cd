// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PhotoPDF.

use thiserror::Error;

use crate::types::DocumentId;

/// Top-level error type for all PhotoPDF operations.
#[derive(Debug, Error)]
pub enum PhotoPdfError {
    // -- Document errors --
    #[error("nothing to work with: no images or pages were supplied")]
    EmptyInput,

    #[error("page index {index} out of range (document has {page_count} pages)")]
    IndexOutOfRange { index: usize, page_count: usize },

    #[error("merging needs at least 2 documents, {selected} selected")]
    InsufficientSelection { selected: usize },

    #[error("document bytes could not be decoded: {0}")]
    Decode(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Storage / persistence --
    #[error("document store error: {0}")]
    Store(String),

    #[error("document {0} not found")]
    NotFound(DocumentId),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("operation cancelled by the user")]
    Cancelled,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PhotoPdfError>;
