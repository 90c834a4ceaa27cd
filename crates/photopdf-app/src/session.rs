// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reader session: one document open in the reader, with its current page.

use image::RgbaImage;
use photopdf_core::error::Result;
use photopdf_core::types::DocumentId;
use photopdf_document::{Document, DocumentEditor, ThumbnailRenderer};

/// Where the document in a reader session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Freshly built from photos, not saved yet.
    Generator,
    /// Loaded from the store. Edits are saved as a new record whose id
    /// replaces this one.
    Store(DocumentId),
}

/// A document open in the reader.
///
/// Navigation is free to call directly. Page edits go through
/// `AppServices`, which decides whether the result must be persisted.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    editor: DocumentEditor,
    origin: SessionOrigin,
}

impl ReaderSession {
    pub fn generated(document: Document) -> Self {
        Self {
            editor: DocumentEditor::new(document),
            origin: SessionOrigin::Generator,
        }
    }

    pub fn stored(id: DocumentId, document: Document) -> Self {
        Self {
            editor: DocumentEditor::new(document),
            origin: SessionOrigin::Store(id),
        }
    }

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    /// The stored record this session reflects, if any.
    pub fn record_id(&self) -> Option<DocumentId> {
        match self.origin {
            SessionOrigin::Store(id) => Some(id),
            SessionOrigin::Generator => None,
        }
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    pub fn current_page(&self) -> usize {
        self.editor.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.editor.page_count()
    }

    pub fn bytes(&self) -> Result<&[u8]> {
        self.editor.bytes()
    }

    pub fn next_page(&mut self) -> bool {
        self.editor.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.editor.previous_page()
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.editor.go_to_page(index)
    }

    /// One preview per page, `None` where a page has nothing renderable.
    pub fn page_previews(&self, renderer: &ThumbnailRenderer) -> Vec<Option<RgbaImage>> {
        renderer.render_all(self.editor.document())
    }

    pub fn current_preview(&self, renderer: &ThumbnailRenderer) -> Option<RgbaImage> {
        renderer.render(self.editor.document(), self.editor.current_page())
    }

    pub(crate) fn delete_page(&mut self, index: usize) -> Result<()> {
        self.editor.delete_page(index)
    }

    pub(crate) fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        self.editor.move_page(from, to)
    }

    pub(crate) fn rebind(&mut self, id: DocumentId) {
        self.origin = SessionOrigin::Store(id);
    }
}
