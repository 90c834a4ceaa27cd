// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::PageLayout;

/// What a merge does with a source whose bytes do not decode as a PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Skip the source, keep merging, and list it in the merge outcome.
    #[default]
    SkipAndReport,
    /// Abort the whole merge with a decode error.
    Strict,
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page geometry for documents built from photos.
    pub page_layout: PageLayout,
    /// Resolution images are embedded at.
    pub image_dpi: f32,
    /// Longest edge, in pixels, an embedded image may keep. Larger photos are
    /// downscaled before they are placed on a page.
    pub max_image_dimension: u32,
    /// Bounding box of the thumbnail stored with each record.
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// Bounding box of the page strip previews in the reader.
    pub page_preview_width: u32,
    pub page_preview_height: u32,
    /// Behaviour when a merge source cannot be decoded.
    pub merge_decode_policy: DecodePolicy,
    /// Suggested file name handed to the share sheet.
    pub share_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_layout: PageLayout::FitImage,
            image_dpi: 150.0,
            max_image_dimension: 4096,
            thumbnail_width: 100,
            thumbnail_height: 150,
            page_preview_width: 60,
            page_preview_height: 80,
            merge_decode_policy: DecodePolicy::SkipAndReport,
            share_filename: "document.pdf".to_string(),
        }
    }
}
