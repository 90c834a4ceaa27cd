// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document merger: concatenates stored documents into a new one.
//
// Sources are decoded one by one and their pages appended, in selection
// order, to an accumulator. Sources are read-only: the caller stores the
// outcome as a brand-new record.

use photopdf_core::config::DecodePolicy;
use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::size::format_file_size;
use photopdf_core::types::{DocumentId, StoredDocumentRecord};
use tracing::{debug, info, instrument, warn};

use crate::pdf::document::Document;
use crate::pdf::thumbnail::ThumbnailRenderer;

/// A source the merge left out because its bytes did not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub id: DocumentId,
    pub name: String,
    pub reason: String,
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The merged document, already serialized.
    pub document: Document,
    /// PNG preview of the first page.
    pub thumbnail: Option<Vec<u8>>,
    /// Human-readable size of the serialized document.
    pub file_size: String,
    /// Sources skipped under [`DecodePolicy::SkipAndReport`].
    pub skipped: Vec<SkippedSource>,
}

impl MergeOutcome {
    pub fn bytes(&self) -> Result<&[u8]> {
        self.document.bytes()
    }

    /// A fresh record (new id, current timestamp) holding the merged document.
    pub fn into_record(self, name: impl Into<String>) -> Result<StoredDocumentRecord> {
        let pdf_data = self.document.to_bytes()?;
        Ok(StoredDocumentRecord::new(name, pdf_data, self.thumbnail))
    }
}

/// Concatenates documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentMerger {
    policy: DecodePolicy,
    thumbnails: ThumbnailRenderer,
}

impl DocumentMerger {
    pub fn new(policy: DecodePolicy) -> Self {
        Self {
            policy,
            thumbnails: ThumbnailRenderer::default(),
        }
    }

    /// Use `renderer` for the outcome's thumbnail.
    pub fn with_thumbnails(mut self, renderer: ThumbnailRenderer) -> Self {
        self.thumbnails = renderer;
        self
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Merge stored records, in order, into a new document.
    ///
    /// Fails with `InsufficientSelection` for fewer than two sources and with
    /// `EmptyInput` when no source contributed a page.
    #[instrument(skip_all, fields(sources = sources.len(), policy = ?self.policy))]
    pub fn merge(&self, sources: &[StoredDocumentRecord]) -> Result<MergeOutcome> {
        if sources.len() < 2 {
            return Err(PhotoPdfError::InsufficientSelection {
                selected: sources.len(),
            });
        }
        info!(sources = sources.len(), "Merging documents");

        let mut merged = Document::new();
        let mut skipped = Vec::new();

        for record in sources {
            let source = match Document::from_bytes(&record.pdf_data) {
                Ok(source) => source,
                Err(err) => match self.policy {
                    DecodePolicy::Strict => {
                        return Err(PhotoPdfError::Decode(format!(
                            "document '{}' ({}) could not be decoded: {err}",
                            record.name, record.id
                        )));
                    }
                    DecodePolicy::SkipAndReport => {
                        warn!(id = %record.id, name = %record.name, %err, "Skipping undecodable document");
                        skipped.push(SkippedSource {
                            id: record.id,
                            name: record.name.clone(),
                            reason: err.to_string(),
                        });
                        continue;
                    }
                },
            };
            debug!(id = %record.id, pages = source.page_count(), "Appending source pages");
            merged.append(&source)?;
        }

        if merged.is_empty() {
            return Err(PhotoPdfError::EmptyInput);
        }

        let bytes_len = merged.bytes()?.len();
        let thumbnail = self.thumbnails.render_png(&merged, 0);
        info!(
            pages = merged.page_count(),
            output_bytes = bytes_len,
            skipped = skipped.len(),
            "Merge complete"
        );

        Ok(MergeOutcome {
            document: merged,
            thumbnail,
            file_size: format_file_size(bytes_len as u64),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::pages::tests::{labelled_collection, labelled_collection_from, labels};

    fn record(name: &str, doc: Document) -> StoredDocumentRecord {
        StoredDocumentRecord::new(name, doc.to_bytes().unwrap(), None)
    }

    fn labelled(first: usize, count: usize) -> Document {
        Document::from_pages(labelled_collection_from(first, count))
    }

    #[test]
    fn merge_concatenates_in_selection_order() {
        let a = record("a", labelled(0, 2));
        let b = record("b", labelled(5, 3));
        let outcome = DocumentMerger::default().merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(labels(outcome.document.pages()), vec![0, 1, 5, 6, 7]);
        assert!(outcome.skipped.is_empty());

        let reversed = DocumentMerger::default().merge(&[b, a]).unwrap();
        assert_eq!(labels(reversed.document.pages()), vec![5, 6, 7, 0, 1]);
    }

    #[test]
    fn fewer_than_two_sources_is_rejected() {
        let only = record("only", Document::from_pages(labelled_collection(1)));
        match DocumentMerger::default().merge(&[only]) {
            Err(PhotoPdfError::InsufficientSelection { selected }) => assert_eq!(selected, 1),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            DocumentMerger::default().merge(&[]),
            Err(PhotoPdfError::InsufficientSelection { selected: 0 })
        ));
    }

    #[test]
    fn undecodable_source_is_skipped_and_reported() {
        let good = record("good", labelled(0, 2));
        let bad = StoredDocumentRecord::new("bad", b"garbage".to_vec(), None);
        let outcome = DocumentMerger::new(DecodePolicy::SkipAndReport)
            .merge(&[good, bad.clone()])
            .unwrap();
        assert_eq!(outcome.document.page_count(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].id, bad.id);
    }

    #[test]
    fn strict_policy_fails_on_undecodable_source() {
        let good = record("good", labelled(0, 1));
        let bad = StoredDocumentRecord::new("bad", b"garbage".to_vec(), None);
        let result = DocumentMerger::new(DecodePolicy::Strict).merge(&[good, bad]);
        assert!(matches!(result, Err(PhotoPdfError::Decode(_))));
    }

    #[test]
    fn nothing_decodable_is_empty_input() {
        let bad1 = StoredDocumentRecord::new("x", b"nope".to_vec(), None);
        let bad2 = StoredDocumentRecord::new("y", b"nope".to_vec(), None);
        let result = DocumentMerger::default().merge(&[bad1, bad2]);
        assert!(matches!(result, Err(PhotoPdfError::EmptyInput)));
    }

    #[test]
    fn sources_are_not_mutated() {
        let a = record("a", labelled(0, 1));
        let b = record("b", labelled(1, 1));
        let (a_bytes, b_bytes) = (a.pdf_data.clone(), b.pdf_data.clone());
        DocumentMerger::default().merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(a.pdf_data, a_bytes);
        assert_eq!(b.pdf_data, b_bytes);
    }

    #[test]
    fn outcome_becomes_a_fresh_record() {
        let a = record("a", labelled(0, 1));
        let b = record("b", labelled(1, 1));
        let outcome = DocumentMerger::default().merge(&[a.clone(), b.clone()]).unwrap();
        let size = outcome.file_size.clone();
        let merged = outcome.into_record("merged").unwrap();
        assert_ne!(merged.id, a.id);
        assert_ne!(merged.id, b.id);
        assert_eq!(merged.file_size, size);
        assert_eq!(Document::from_bytes(&merged.pdf_data).unwrap().page_count(), 2);
    }
}
