// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use photopdf_core::error::Result;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: ImageSource + NativeCamera + ShareSink {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop").
    fn platform_name(&self) -> &str;
}

/// Pick photos from the device library.
pub trait ImageSource {
    /// Let the user choose up to `limit` images (0 = no limit) and return
    /// their encoded bytes in the order chosen. `Ok(None)` means the user
    /// cancelled; nothing is kept from a cancelled pick.
    fn pick_images(&self, limit: usize) -> Result<Option<Vec<Vec<u8>>>>;
}

/// Capture images from the device camera.
pub trait NativeCamera {
    /// Launch the system camera and return the captured JPEG bytes.
    /// Returns Ok(None) if the user cancelled.
    fn capture_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Hand documents to the platform's share mechanism.
pub trait ShareSink {
    /// Share `document` under `suggested_filename`. Success means the
    /// platform accepted the hand-off, not that the user completed it.
    fn share_document(&self, document: &[u8], suggested_filename: &str) -> Result<()>;
}
