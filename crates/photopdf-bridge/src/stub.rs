// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for targets without a native implementation.
//
// Every trait method returns `PlatformUnavailable`.

use photopdf_core::error::{PhotoPdfError, Result};

use crate::traits::*;

/// No-op bridge.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unsupported (stub)"
    }
}

impl ImageSource for StubBridge {
    fn pick_images(&self, _limit: usize) -> Result<Option<Vec<Vec<u8>>>> {
        tracing::warn!("ImageSource::pick_images called on stub bridge");
        Err(PhotoPdfError::PlatformUnavailable)
    }
}

impl NativeCamera for StubBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_image called on stub bridge");
        Err(PhotoPdfError::PlatformUnavailable)
    }
}

impl ShareSink for StubBridge {
    fn share_document(&self, _document: &[u8], _suggested_filename: &str) -> Result<()> {
        tracing::warn!("ShareSink::share_document called on stub bridge");
        Err(PhotoPdfError::PlatformUnavailable)
    }
}
