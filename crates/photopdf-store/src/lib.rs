// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// photopdf-store: Local persistence for saved documents.
//
// Records are written once and deleted whole; there is no update path. Every
// successful mutation is announced to subscribers so views can re-read the
// list.

pub mod integrity;
pub mod memory;
pub mod notify;
pub mod sqlite;
pub mod store;

pub use integrity::{content_digest, verify_digest};
pub use memory::InMemoryDocumentStore;
pub use notify::{ChangeCallback, ChangeNotifier, StoreChange, SubscriptionId};
pub use sqlite::SqliteDocumentStore;
pub use store::{DocumentListing, DocumentStore};
