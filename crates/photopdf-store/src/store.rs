// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The repository interface every document store implements.

use photopdf_core::error::Result;
use photopdf_core::types::{DocumentId, StoredDocumentRecord};

use crate::notify::{ChangeCallback, ChangeNotifier, SubscriptionId};

/// A listing of the store: the intact records, newest first, and the ids of
/// rows whose payload failed its integrity check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentListing {
    pub records: Vec<StoredDocumentRecord>,
    pub damaged: Vec<DocumentId>,
}

/// Persistent collection of [`StoredDocumentRecord`]s.
///
/// Each call is atomic for the record it touches; `delete_all` is a single
/// bulk operation. Subscribers are notified after the change is committed,
/// never for a failed call.
pub trait DocumentStore {
    /// Persist a new record. Saving an id that already exists is a `Store`
    /// error; records are never overwritten.
    fn save(&self, record: &StoredDocumentRecord) -> Result<()>;

    /// Fetch one record, or `None` if it does not exist.
    fn get(&self, id: &DocumentId) -> Result<Option<StoredDocumentRecord>>;

    /// Remove one record. A missing id is `NotFound`.
    fn delete(&self, id: &DocumentId) -> Result<()>;

    /// Remove every record.
    fn delete_all(&self) -> Result<()>;

    /// All records, newest first. Damaged rows are left out; see
    /// [`Self::list_checked`].
    fn list_all(&self) -> Result<Vec<StoredDocumentRecord>>;

    /// Like `list_all`, but also names the damaged rows so they can still be
    /// shown and deleted.
    fn list_checked(&self) -> Result<DocumentListing> {
        Ok(DocumentListing {
            records: self.list_all()?,
            damaged: Vec::new(),
        })
    }

    fn count(&self) -> Result<usize>;

    /// The notifier mutations are announced through.
    fn notifier(&self) -> &ChangeNotifier;

    fn subscribe(&self, callback: ChangeCallback) -> SubscriptionId {
        self.notifier().subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier().unsubscribe(id)
    }

    /// Fetch several records, keeping the order of `ids`. Fails with
    /// `NotFound` on the first id that does not exist.
    fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<StoredDocumentRecord>> {
        ids.iter()
            .map(|id| self.get(id)?.ok_or(photopdf_core::PhotoPdfError::NotFound(*id)))
            .collect()
    }
}
