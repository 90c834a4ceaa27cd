// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: the snapshot the UI shell renders from.
//
// The snapshot subscribes to store changes when it is created. Callbacks only
// flag it stale; the shell calls `sync` on its own thread to re-read the list.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use photopdf_core::AppConfig;
use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::human_errors::{HumanError, humanize_error};
use photopdf_core::types::{DocumentId, StoredDocumentRecord};
use photopdf_store::{DocumentListing, StoreChange, SubscriptionId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::services::app_services::AppServices;

/// One row of the document list: everything but the PDF payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Human-readable payload size, e.g. "245 KB".
    pub file_size: String,
    /// PNG thumbnail of the first page.
    pub thumbnail: Option<Vec<u8>>,
}

impl From<&StoredDocumentRecord> for DocumentSummary {
    fn from(record: &StoredDocumentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            created_at: record.created_at,
            file_size: record.file_size.clone(),
            thumbnail: record.thumbnail.clone(),
        }
    }
}

/// State shared by every screen of the shell.
#[derive(Debug)]
pub struct AppState {
    /// Saved documents, newest first.
    pub documents: Vec<DocumentSummary>,
    /// Records whose payload failed its integrity check. They can only be
    /// deleted.
    pub damaged: Vec<DocumentId>,
    /// Application settings.
    pub config: AppConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
    /// The last failure, ready for an alert.
    pub last_error: Option<HumanError>,
    stale: Arc<AtomicBool>,
    subscription: SubscriptionId,
}

impl AppState {
    /// Create initial state from the backend services and start listening
    /// for store changes.
    pub fn new(svc: &AppServices) -> Self {
        let stale = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stale);
        let subscription = svc.store().subscribe(Arc::new(move |change: &StoreChange| {
            debug!(?change, "document list is stale");
            flag.store(true, Ordering::Release);
        }));

        let listing = svc.document_listing().unwrap_or_else(|e| {
            warn!(error = %e, "could not load saved documents");
            DocumentListing::default()
        });

        Self {
            documents: listing.records.iter().map(DocumentSummary::from).collect(),
            damaged: listing.damaged,
            config: svc.config().clone(),
            status_message: None,
            last_error: None,
            stale,
            subscription,
        }
    }

    /// Whether the store changed since the last sync.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Re-read the document list if the store changed. Returns whether the
    /// list was reloaded.
    pub fn sync(&mut self, svc: &AppServices) -> Result<bool> {
        if !self.stale.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }
        match svc.document_listing() {
            Ok(listing) => {
                self.documents = listing.records.iter().map(DocumentSummary::from).collect();
                self.damaged = listing.damaged;
                debug!(
                    count = self.documents.len(),
                    damaged = self.damaged.len(),
                    "document list reloaded"
                );
                Ok(true)
            }
            Err(e) => {
                // Try again on the next sync.
                self.stale.store(true, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Pick up settings changed through `AppServices::save_config`.
    pub fn reload_config(&mut self, svc: &AppServices) {
        self.config = svc.config().clone();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.last_error = None;
    }

    /// Show `err` to the user.
    pub fn report_error(&mut self, err: &PhotoPdfError) {
        let human = humanize_error(err);
        self.status_message = Some(human.message.clone());
        self.last_error = Some(human);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.last_error = None;
    }

    /// Stop listening for store changes.
    pub fn detach(self, svc: &AppServices) {
        svc.store().unsubscribe(self.subscription);
    }
}
