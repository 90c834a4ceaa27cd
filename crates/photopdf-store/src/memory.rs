// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Volatile document store, used in tests and as a fallback when the database
// cannot be opened.

use std::sync::{Mutex, MutexGuard, PoisonError};

use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::types::{DocumentId, StoredDocumentRecord};
use tracing::{debug, info};

use crate::notify::{ChangeNotifier, StoreChange};
use crate::store::DocumentStore;

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    /// Insertion order.
    records: Mutex<Vec<StoredDocumentRecord>>,
    notifier: ChangeNotifier,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Vec<StoredDocumentRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn save(&self, record: &StoredDocumentRecord) -> Result<()> {
        {
            let mut records = self.records();
            if records.iter().any(|r| r.id == record.id) {
                return Err(PhotoPdfError::Store(format!("document {} already exists", record.id)));
            }
            records.push(record.clone());
        }
        debug!(id = %record.id, bytes = record.pdf_data.len(), "Document saved in memory");
        self.notifier.notify(StoreChange::Saved(record.id));
        Ok(())
    }

    fn get(&self, id: &DocumentId) -> Result<Option<StoredDocumentRecord>> {
        Ok(self.records().iter().find(|r| r.id == *id).cloned())
    }

    fn delete(&self, id: &DocumentId) -> Result<()> {
        {
            let mut records = self.records();
            let before = records.len();
            records.retain(|r| r.id != *id);
            if records.len() == before {
                return Err(PhotoPdfError::NotFound(*id));
            }
        }
        self.notifier.notify(StoreChange::Deleted(*id));
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let removed = {
            let mut records = self.records();
            let removed = records.len();
            records.clear();
            removed
        };
        info!(removed, "All in-memory documents deleted");
        self.notifier.notify(StoreChange::Cleared);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<StoredDocumentRecord>> {
        // Latest insertion first among equal timestamps, then a stable sort.
        let mut records: Vec<StoredDocumentRecord> = self.records().iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records().len())
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
