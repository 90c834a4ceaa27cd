// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document editor: page deletion and reordering with a tracked current page.
//
// Edits never patch the page tree in place: the surviving pages are copied
// into a fresh document (filter + rebuild), which is then serialized straight
// away so the caller can persist or share the result.

use photopdf_core::error::Result;
use tracing::{debug, info, instrument};

use crate::pdf::document::Document;

/// Zero-based index of the page currently shown.
///
/// All clamping rules live here so the reader, the generator preview and the
/// editor agree on where the cursor ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    index: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance one page. Returns `false` (and stays put) on the last page.
    pub fn next(&mut self, page_count: usize) -> bool {
        if self.index + 1 < page_count {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` (and stays put) on the first page.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `index`. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize, page_count: usize) -> bool {
        if index < page_count {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Pull the cursor back inside `[0, page_count)`; 0 for an empty document.
    pub fn clamp(&mut self, page_count: usize) {
        self.index = self.index.min(page_count.saturating_sub(1));
    }

    /// Reposition after the page at `deleted` was removed, leaving
    /// `page_count` pages.
    pub fn after_delete(&mut self, deleted: usize, page_count: usize) {
        if page_count == 0 {
            self.index = 0;
        } else if self.index >= page_count {
            self.index = page_count - 1;
        } else if self.index >= deleted && self.index > 0 {
            self.index -= 1;
        }
    }

    /// Reposition after the page at `from` moved to `to`, so the cursor keeps
    /// pointing at the same page.
    pub fn after_move(&mut self, from: usize, to: usize) {
        if self.index == from {
            self.index = to;
        } else if from < self.index && self.index <= to {
            self.index -= 1;
        } else if to <= self.index && self.index < from {
            self.index += 1;
        }
    }
}

/// Remove the page at `index`, returning a new serialized document.
///
/// The input is left untouched; an invalid index fails with
/// `IndexOutOfRange`.
#[instrument(skip(document), fields(page_count = document.page_count()))]
pub fn delete_page(document: &Document, index: usize) -> Result<Document> {
    let pages = document.pages().without_page(index)?;
    let edited = Document::from_pages(pages);
    edited.bytes()?;
    info!(remaining = edited.page_count(), "Page deleted");
    Ok(edited)
}

/// Move the page at `from` to position `to`, returning a new serialized
/// document.
#[instrument(skip(document), fields(page_count = document.page_count()))]
pub fn move_page(document: &Document, from: usize, to: usize) -> Result<Document> {
    let pages = document.pages().with_page_moved(from, to)?;
    let edited = Document::from_pages(pages);
    edited.bytes()?;
    debug!("Page moved");
    Ok(edited)
}

/// A document opened for editing, plus the page the user is looking at.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    cursor: PageCursor,
}

impl DocumentEditor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            cursor: PageCursor::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn current_page(&self) -> usize {
        self.cursor.index()
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Serialized bytes of the current document.
    pub fn bytes(&self) -> Result<&[u8]> {
        self.document.bytes()
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.page_count();
        self.cursor.next(count)
    }

    pub fn previous_page(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        let count = self.page_count();
        self.cursor.go_to(index, count)
    }

    /// Delete the page at `index`. On error the document and cursor are
    /// unchanged.
    pub fn delete_page(&mut self, index: usize) -> Result<()> {
        let edited = delete_page(&self.document, index)?;
        self.cursor.after_delete(index, edited.page_count());
        self.document = edited;
        Ok(())
    }

    /// Move the page at `from` to `to`. On error nothing changes.
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        let edited = move_page(&self.document, from, to)?;
        self.cursor.after_move(from, to);
        self.document = edited;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::pages::tests::{labelled_collection, labels};
    use photopdf_core::error::PhotoPdfError;

    fn doc(count: usize) -> Document {
        Document::from_pages(labelled_collection(count))
    }

    #[test]
    fn delete_keeps_relative_order() {
        let edited = delete_page(&doc(4), 2).unwrap();
        assert_eq!(labels(edited.pages()), vec![0, 1, 3]);
        assert!(edited.is_serialized());
    }

    #[test]
    fn delete_out_of_range_leaves_document_alone() {
        let original = doc(3);
        let before = original.to_bytes().unwrap();
        let err = delete_page(&original, 3).unwrap_err();
        assert!(matches!(
            err,
            PhotoPdfError::IndexOutOfRange {
                index: 3,
                page_count: 3
            }
        ));
        assert_eq!(original.to_bytes().unwrap(), before);
    }

    #[test]
    fn deleting_the_only_page_leaves_an_empty_document() {
        let mut editor = DocumentEditor::new(doc(1));
        editor.delete_page(0).unwrap();
        assert_eq!(editor.page_count(), 0);
        assert_eq!(editor.current_page(), 0);
        assert!(editor.bytes().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn cursor_clamps_when_last_page_deleted() {
        let mut editor = DocumentEditor::new(doc(3));
        assert!(editor.go_to_page(2));
        editor.delete_page(2).unwrap();
        assert_eq!(editor.current_page(), 1);
    }

    #[test]
    fn cursor_steps_back_when_page_at_or_before_it_is_deleted() {
        let mut editor = DocumentEditor::new(doc(4));
        editor.go_to_page(2);
        editor.delete_page(0).unwrap();
        assert_eq!(editor.current_page(), 1);

        let mut editor = DocumentEditor::new(doc(4));
        editor.go_to_page(1);
        editor.delete_page(1).unwrap();
        assert_eq!(editor.current_page(), 0);
    }

    #[test]
    fn cursor_stays_when_later_page_deleted() {
        let mut editor = DocumentEditor::new(doc(4));
        editor.go_to_page(1);
        editor.delete_page(3).unwrap();
        assert_eq!(editor.current_page(), 1);
    }

    #[test]
    fn cursor_never_goes_below_zero() {
        let mut editor = DocumentEditor::new(doc(3));
        editor.delete_page(0).unwrap();
        assert_eq!(editor.current_page(), 0);
    }

    #[test]
    fn failed_delete_keeps_cursor() {
        let mut editor = DocumentEditor::new(doc(3));
        editor.go_to_page(2);
        assert!(editor.delete_page(9).is_err());
        assert_eq!(editor.current_page(), 2);
        assert_eq!(editor.page_count(), 3);
    }

    #[test]
    fn navigation_respects_bounds() {
        let mut editor = DocumentEditor::new(doc(2));
        assert!(!editor.previous_page());
        assert!(editor.next_page());
        assert!(!editor.next_page());
        assert_eq!(editor.current_page(), 1);
        assert!(!editor.go_to_page(2));
        assert_eq!(editor.current_page(), 1);
        assert!(editor.previous_page());
        assert_eq!(editor.current_page(), 0);
    }

    #[test]
    fn cursor_follows_moved_page() {
        let mut editor = DocumentEditor::new(doc(4));
        editor.go_to_page(1);
        editor.move_page(1, 3).unwrap();
        assert_eq!(editor.current_page(), 3);
        assert_eq!(labels(editor.document().pages()), vec![0, 2, 3, 1]);
    }

    #[test]
    fn cursor_shifts_to_keep_its_page() {
        let mut cursor = PageCursor::new();
        cursor.go_to(2, 4);
        cursor.after_move(0, 3);
        assert_eq!(cursor.index(), 1);
        cursor.after_move(3, 0);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn move_with_invalid_index_fails() {
        let mut editor = DocumentEditor::new(doc(2));
        assert!(matches!(
            editor.move_page(0, 2),
            Err(PhotoPdfError::IndexOutOfRange { .. })
        ));
        assert_eq!(labels(editor.document().pages()), vec![0, 1]);
    }

    #[test]
    fn clamp_pulls_cursor_inside() {
        let mut cursor = PageCursor::new();
        cursor.go_to(5, 6);
        cursor.clamp(3);
        assert_eq!(cursor.index(), 2);
        cursor.clamp(0);
        assert_eq!(cursor.index(), 0);
    }
}
