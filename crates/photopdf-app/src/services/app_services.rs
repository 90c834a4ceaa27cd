// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: initialises the backend subsystems and provides the
// operations the UI shell calls.
//
// Everything here is synchronous and single-threaded. `AppServices` owns the
// store and the platform bridge outright; the shell keeps one instance and
// calls it from its UI thread.

use std::path::{Path, PathBuf};

use chrono::Utc;
use photopdf_bridge::{PlatformBridge, platform_bridge};
use photopdf_core::AppConfig;
use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::types::{DocumentId, StoredDocumentRecord, default_document_name};
use photopdf_document::{Document, DocumentBuilder, DocumentMerger, SkippedSource, ThumbnailRenderer};
use photopdf_store::{DocumentListing, DocumentStore, InMemoryDocumentStore, SqliteDocumentStore};
use tracing::{debug, info, instrument, warn};

use super::data_dir;
use crate::selection::{GeneratorSelection, MergeSelection};
use crate::session::ReaderSession;

/// Database file inside the data directory.
const DATABASE_FILE: &str = "documents.db";

/// What a completed merge produced.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// The new record, already saved.
    pub record: StoredDocumentRecord,
    /// Sources left out because their bytes did not decode.
    pub skipped: Vec<SkippedSource>,
}

/// The backend the UI shell talks to.
pub struct AppServices {
    store: Box<dyn DocumentStore>,
    bridge: Box<dyn PlatformBridge>,
    /// `None` for a purely in-memory instance; config is then never written.
    data_dir: Option<PathBuf>,
    config: AppConfig,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("platform", &self.bridge.platform_name())
            .field("data_dir", &self.data_dir)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    ///
    /// Creates the data directory, opens the document database and loads the
    /// persisted config (or defaults).
    pub fn init(explicit_data_dir: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir(explicit_data_dir)?;
        info!(path = %dir.display(), "initialising app services");

        let store = SqliteDocumentStore::open(dir.join(DATABASE_FILE))?;
        let config = load_config(&dir).unwrap_or_default();
        let bridge = platform_bridge(&dir);

        info!(platform = bridge.platform_name(), "app services initialised");
        Ok(Self {
            store: Box::new(store),
            bridge,
            data_dir: Some(dir),
            config,
        })
    }

    /// Services with a volatile store, for when the database cannot be
    /// opened. The bridge and config still use the data directory.
    pub fn fallback(explicit_data_dir: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir(explicit_data_dir)?;
        warn!(path = %dir.display(), "using in-memory document store");
        let config = load_config(&dir).unwrap_or_default();
        let bridge = platform_bridge(&dir);
        Ok(Self {
            store: Box::new(InMemoryDocumentStore::new()),
            bridge,
            data_dir: Some(dir),
            config,
        })
    }

    /// Fully in-memory services with default config and the unavailable
    /// stub bridge. Nothing touches the file system.
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(InMemoryDocumentStore::new()),
            bridge: Box::new(photopdf_bridge::stub::StubBridge),
            data_dir: None,
            config: AppConfig::default(),
        }
    }

    /// Assemble services from explicit parts (native shells inject their
    /// own bridge this way).
    pub fn from_parts(
        store: Box<dyn DocumentStore>,
        bridge: Box<dyn PlatformBridge>,
        data_dir: Option<PathBuf>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            bridge,
            data_dir,
            config,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn bridge(&self) -> &dyn PlatformBridge {
        self.bridge.as_ref()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Update and persist the config.
    pub fn save_config(&mut self, config: AppConfig) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            persist_config(dir, &config)?;
        }
        self.config = config;
        Ok(())
    }

    // -- Image input ---------------------------------------------------------

    /// Ask the platform for photos and append them to `selection`. Returns
    /// how many were added; a cancelled pick adds none, and so does a pick
    /// with any photo that fails to decode.
    #[instrument(skip_all, fields(selected = selection.len()))]
    pub fn pick_images(&self, selection: &mut GeneratorSelection, limit: usize) -> Result<usize> {
        let Some(picked) = self.bridge.pick_images(limit)? else {
            debug!("image pick cancelled");
            return Ok(0);
        };
        let added = selection.add_all_encoded(&picked)?;
        info!(added, "images added to selection");
        Ok(added)
    }

    /// Take one photo with the camera and append it. Returns `false` if the
    /// user cancelled.
    pub fn capture_image(&self, selection: &mut GeneratorSelection) -> Result<bool> {
        match self.bridge.capture_image()? {
            Some(bytes) => {
                selection.add_encoded(&bytes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -- Documents -----------------------------------------------------------

    /// Build an unsaved document from the selected photos, one page each.
    #[instrument(skip_all, fields(images = selection.len()))]
    pub fn generate_document(&self, selection: &GeneratorSelection) -> Result<Document> {
        DocumentBuilder::from_config(&self.config).build(selection.images().to_vec())
    }

    /// Save `document` as a new record. `name` defaults to
    /// `document_<unix seconds>`.
    #[instrument(skip(self, document), fields(pages = document.page_count()))]
    pub fn save_document(&self, document: &Document, name: Option<&str>) -> Result<StoredDocumentRecord> {
        let name = match name {
            Some(name) => name.to_string(),
            None => default_document_name(Utc::now()),
        };
        let thumbnail = ThumbnailRenderer::for_records(&self.config).render_png(document, 0);
        let record = StoredDocumentRecord::new(name, document.to_bytes()?, thumbnail);
        self.store.save(&record)?;
        info!(id = %record.id, size = %record.file_size, "document saved");
        Ok(record)
    }

    /// Load a saved document into a reader session.
    #[instrument(skip(self))]
    pub fn open_document(&self, id: DocumentId) -> Result<ReaderSession> {
        let record = self.store.get(&id)?.ok_or(PhotoPdfError::NotFound(id))?;
        let document = Document::from_bytes(&record.pdf_data)?;
        debug!(pages = document.page_count(), "document opened");
        Ok(ReaderSession::stored(id, document))
    }

    /// Delete a page from the open document.
    ///
    /// A session opened from the store is saved as a new record and now
    /// reflects it; the record it was opened from is left as it was. Returns
    /// the new record, or `None` for an unsaved session or a document that
    /// no longer has pages.
    #[instrument(skip(self, session), fields(pages = session.page_count()))]
    pub fn delete_page(&self, session: &mut ReaderSession, index: usize) -> Result<Option<StoredDocumentRecord>> {
        let mut edited = session.clone();
        edited.delete_page(index)?;
        self.commit_edit(session, edited)
    }

    /// Move a page within the open document, persisting like [`Self::delete_page`].
    #[instrument(skip(self, session), fields(pages = session.page_count()))]
    pub fn move_page(
        &self,
        session: &mut ReaderSession,
        from: usize,
        to: usize,
    ) -> Result<Option<StoredDocumentRecord>> {
        let mut edited = session.clone();
        edited.move_page(from, to)?;
        self.commit_edit(session, edited)
    }

    /// Save `edited` if it came from the store, then replace `session` with
    /// it. A failed save leaves `session` as it was.
    fn commit_edit(
        &self,
        session: &mut ReaderSession,
        mut edited: ReaderSession,
    ) -> Result<Option<StoredDocumentRecord>> {
        let saved = match edited.record_id() {
            Some(source) if edited.page_count() == 0 => {
                warn!(%source, "last page deleted, nothing to save");
                None
            }
            Some(_) => {
                let record = self.save_document(edited.document(), None)?;
                edited.rebind(record.id);
                Some(record)
            }
            None => None,
        };
        *session = edited;
        Ok(saved)
    }

    /// Merge the selected documents, in selection order, into a new saved
    /// record. The selection is cleared once the record is saved and kept
    /// if anything fails.
    #[instrument(skip_all, fields(selected = selection.len()))]
    pub fn merge_documents(&self, selection: &mut MergeSelection, name: Option<&str>) -> Result<MergeReport> {
        if !selection.can_merge() {
            return Err(PhotoPdfError::InsufficientSelection {
                selected: selection.len(),
            });
        }
        let sources = self.store.get_many(selection.ids())?;
        let outcome = DocumentMerger::new(self.config.merge_decode_policy)
            .with_thumbnails(ThumbnailRenderer::for_records(&self.config))
            .merge(&sources)?;

        let skipped = outcome.skipped.clone();
        let name = match name {
            Some(name) => name.to_string(),
            None => default_document_name(Utc::now()),
        };
        let record = outcome.into_record(name)?;
        self.store.save(&record)?;
        selection.clear();

        info!(id = %record.id, skipped = skipped.len(), "merged document saved");
        Ok(MergeReport { record, skipped })
    }

    pub fn delete_document(&self, id: DocumentId) -> Result<()> {
        self.store.delete(&id)
    }

    pub fn delete_all(&self) -> Result<()> {
        self.store.delete_all()
    }

    /// All saved documents, newest first.
    pub fn documents(&self) -> Result<Vec<StoredDocumentRecord>> {
        self.store.list_all()
    }

    /// Saved documents plus the ids of any that failed their integrity
    /// check. Damaged ids can be passed to [`Self::delete_document`].
    pub fn document_listing(&self) -> Result<DocumentListing> {
        self.store.list_checked()
    }

    // -- Previews ------------------------------------------------------------

    /// PNG previews for the reader's page strip, `None` where a page has
    /// nothing renderable.
    pub fn page_previews(&self, session: &ReaderSession) -> Vec<Option<Vec<u8>>> {
        let renderer = ThumbnailRenderer::for_page_strip(&self.config);
        (0..session.page_count())
            .map(|index| renderer.render_png(session.document(), index))
            .collect()
    }

    // -- Sharing -------------------------------------------------------------

    /// Hand the session's current document to the share sheet.
    #[instrument(skip_all, fields(pages = session.page_count()))]
    pub fn share_current(&self, session: &ReaderSession) -> Result<()> {
        let bytes = session.bytes()?;
        self.bridge.share_document(bytes, &self.config.share_filename)
    }

    /// Share a saved document under its own file name.
    #[instrument(skip(self))]
    pub fn share_document(&self, id: DocumentId) -> Result<()> {
        let record = self.store.get(&id)?.ok_or(PhotoPdfError::NotFound(id))?;
        self.bridge.share_document(&record.pdf_data, &record.file_name())
    }
}

// -- Config persistence ------------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
