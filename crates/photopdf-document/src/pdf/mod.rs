// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page collections, building, editing, merging, and thumbnails.

pub mod builder;
pub mod document;
pub mod editor;
pub mod merger;
pub mod pages;
pub mod thumbnail;

pub use builder::DocumentBuilder;
pub use document::Document;
pub use editor::{DocumentEditor, PageCursor};
pub use merger::{DocumentMerger, MergeOutcome, SkippedSource};
pub use pages::{Page, PageBox, PageCollection};
pub use thumbnail::ThumbnailRenderer;
