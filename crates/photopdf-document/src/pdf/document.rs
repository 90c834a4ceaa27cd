// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document: a page collection plus its serialized PDF bytes.

use std::cell::OnceCell;

use photopdf_core::error::Result;
use tracing::debug;

use crate::pdf::pages::{Page, PageCollection};

/// An in-memory PDF document.
///
/// The serialized form is derived from the page collection and cached. Every
/// mutation goes through `&mut self` and clears the cache, so the bytes handed
/// out always describe the current pages. A document decoded from bytes keeps
/// those bytes as its serialized form until it is changed.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: PageCollection,
    serialized: OnceCell<Vec<u8>>,
}

impl Document {
    /// An empty document with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a page collection. Serialization is deferred until first needed.
    pub fn from_pages(pages: PageCollection) -> Self {
        Self {
            pages,
            serialized: OnceCell::new(),
        }
    }

    /// Decode PDF bytes. Fails with `Decode` when the bytes are not a PDF.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let pages = PageCollection::from_bytes(data)?;
        debug!(bytes = data.len(), pages = pages.page_count(), "Document decoded");
        Ok(Self {
            pages,
            serialized: OnceCell::from(data.to_vec()),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        self.pages.page(index)
    }

    pub fn pages(&self) -> &PageCollection {
        &self.pages
    }

    /// Serialized PDF bytes, produced on first call and cached.
    pub fn bytes(&self) -> Result<&[u8]> {
        if let Some(bytes) = self.serialized.get() {
            return Ok(bytes.as_slice());
        }
        let bytes = self.pages.to_bytes()?;
        debug!(bytes = bytes.len(), pages = self.page_count(), "Document serialized");
        Ok(self.serialized.get_or_init(|| bytes).as_slice())
    }

    /// Owned copy of the serialized bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.bytes().map(<[u8]>::to_vec)
    }

    /// Whether the serialized form is currently cached.
    pub fn is_serialized(&self) -> bool {
        self.serialized.get().is_some()
    }

    /// Replace the pages wholesale, invalidating the cached bytes.
    pub fn replace_pages(&mut self, pages: PageCollection) {
        self.serialized.take();
        self.pages = pages;
    }

    /// Append copies of every page of `other`.
    pub fn append(&mut self, other: &Document) -> Result<()> {
        self.serialized.take();
        self.pages.append_all(&other.pages)
    }

    pub fn into_pages(self) -> PageCollection {
        self.pages
    }
}
