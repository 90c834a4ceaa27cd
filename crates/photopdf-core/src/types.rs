// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for PhotoPDF.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::size::format_file_size;

/// File extension every stored document carries.
pub const PDF_EXTENSION: &str = "pdf";

/// Unique identifier for a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved document: metadata plus the raw PDF payload.
///
/// Records are created at save time and never patched afterwards; the only
/// mutation a store supports is deleting the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocumentRecord {
    pub id: DocumentId,
    /// Display name shown in the document list.
    pub name: String,
    /// Always [`PDF_EXTENSION`].
    pub file_extension: String,
    pub created_at: DateTime<Utc>,
    /// Serialized PDF bytes.
    pub pdf_data: Vec<u8>,
    /// PNG preview of the first page, if one could be rendered.
    pub thumbnail: Option<Vec<u8>>,
    /// Human-readable payload size, e.g. "245 KB".
    pub file_size: String,
}

impl StoredDocumentRecord {
    /// Build a fresh record with a new id and the current timestamp.
    pub fn new(name: impl Into<String>, pdf_data: Vec<u8>, thumbnail: Option<Vec<u8>>) -> Self {
        let file_size = format_file_size(pdf_data.len() as u64);
        Self {
            id: DocumentId::new(),
            name: name.into(),
            file_extension: PDF_EXTENSION.to_string(),
            created_at: Utc::now(),
            pdf_data,
            thumbnail,
            file_size,
        }
    }

    /// File name used when exporting, e.g. "document_1726750000.pdf".
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.file_extension)
    }
}

/// Default display name for a new document: `document_<unix seconds>`.
pub fn default_document_name(now: DateTime<Utc>) -> String {
    format!("document_{}", now.timestamp())
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// How an image is laid out on its page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLayout {
    /// The page takes the image's own size at the configured DPI.
    #[default]
    FitImage,
    /// The image is centred on a fixed paper size, inside margins.
    Paper(PaperSize),
}

/// Lifecycle of a document as seen by the app.
///
/// Transitions are user-driven; nothing moves a document between states in
/// the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentLifecycle {
    Empty,
    Building,
    Built,
    Viewing,
    Editing,
    Saved,
    Merging,
    SavedAsNew,
    Deleted,
}

impl DocumentLifecycle {
    /// Whether the app may move from `self` to `next`.
    pub fn can_transition_to(self, next: DocumentLifecycle) -> bool {
        use DocumentLifecycle::*;
        matches!(
            (self, next),
            (Empty, Building)
                | (Building, Built)
                | (Building, Empty)
                | (Built, Viewing)
                | (Built, Saved)
                | (Viewing, Editing)
                | (Editing, Viewing)
                | (Viewing, Saved)
                | (Editing, Saved)
                | (Saved, Viewing)
                | (Saved, Merging)
                | (Saved, Deleted)
                | (Merging, SavedAsNew)
                | (Merging, Saved)
                | (SavedAsNew, Viewing)
                | (SavedAsNew, Deleted)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_record_derives_size_and_extension() {
        let record = StoredDocumentRecord::new("scan", vec![0u8; 2048], None);
        assert_eq!(record.file_extension, "pdf");
        assert_eq!(record.file_size, "2 KB");
        assert_eq!(record.file_name(), "scan.pdf");
    }

    #[test]
    fn records_get_distinct_ids() {
        let a = StoredDocumentRecord::new("a", Vec::new(), None);
        let b = StoredDocumentRecord::new("b", Vec::new(), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn default_name_uses_unix_seconds() {
        let now = Utc.with_ymd_and_hms(2025, 9, 19, 12, 0, 0).unwrap();
        assert_eq!(default_document_name(now), "document_1758283200");
    }

    #[test]
    fn lifecycle_allows_merge_only_from_saved() {
        assert!(DocumentLifecycle::Saved.can_transition_to(DocumentLifecycle::Merging));
        assert!(!DocumentLifecycle::Built.can_transition_to(DocumentLifecycle::Merging));
        assert!(DocumentLifecycle::Viewing.can_transition_to(DocumentLifecycle::Editing));
        assert!(DocumentLifecycle::Editing.can_transition_to(DocumentLifecycle::Viewing));
        assert!(!DocumentLifecycle::Deleted.can_transition_to(DocumentLifecycle::Viewing));
    }
}
