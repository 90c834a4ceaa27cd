// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PhotoPDF: platform bridge abstractions.
//
// The document core never talks to a photo library or share sheet directly;
// it goes through the traits in `traits`. Desktop builds get a directory-based
// implementation, mobile builds a stub until native bridges are wired in.

use std::path::Path;

pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

pub mod stub;

pub use traits::{ImageSource, NativeCamera, PlatformBridge, ShareSink};

/// The bridge for the target operating system.
///
/// `data_dir` is where the desktop bridge keeps its `inbox/` (images offered
/// to the picker) and `exports/` (shared documents) directories.
pub fn platform_bridge(data_dir: &Path) -> Box<dyn PlatformBridge> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(desktop::DesktopBridge::in_data_dir(data_dir))
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        let _ = data_dir;
        Box::new(stub::StubBridge)
    }
}
