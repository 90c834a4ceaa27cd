// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge: directories stand in for the photo library and the share
// sheet.
//
// Images dropped into the inbox directory are what the picker offers, in file
// name order. Shared documents are written into the export directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use photopdf_core::error::{PhotoPdfError, Result};
use tracing::{debug, info, instrument};

use crate::traits::*;

/// File extensions the inbox picker accepts.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff"];

pub struct DesktopBridge {
    inbox: PathBuf,
    export_dir: PathBuf,
}

impl DesktopBridge {
    pub fn new(inbox: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            inbox: inbox.into(),
            export_dir: export_dir.into(),
        }
    }

    /// `<data_dir>/inbox` and `<data_dir>/exports`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("inbox"), data_dir.join("exports"))
    }

    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn inbox_images(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.inbox)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl ImageSource for DesktopBridge {
    /// An absent or empty inbox counts as a cancelled pick.
    #[instrument(skip(self), fields(inbox = %self.inbox.display()))]
    fn pick_images(&self, limit: usize) -> Result<Option<Vec<Vec<u8>>>> {
        if !self.inbox.is_dir() {
            debug!("inbox does not exist, treating as cancelled");
            return Ok(None);
        }
        let mut paths = self.inbox_images()?;
        if limit > 0 {
            paths.truncate(limit);
        }
        if paths.is_empty() {
            return Ok(None);
        }

        let images = paths
            .iter()
            .map(std::fs::read)
            .collect::<std::io::Result<Vec<_>>>()?;
        info!(count = images.len(), "images picked from inbox");
        Ok(Some(images))
    }
}

impl NativeCamera for DesktopBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_image called on desktop bridge");
        Err(PhotoPdfError::PlatformUnavailable)
    }
}

impl ShareSink for DesktopBridge {
    /// Writes the document atomically into the export directory, replacing
    /// any earlier export with the same name.
    #[instrument(skip(self, document), fields(bytes = document.len(), %suggested_filename))]
    fn share_document(&self, document: &[u8], suggested_filename: &str) -> Result<()> {
        let file_name = sanitise_file_name(suggested_filename);
        std::fs::create_dir_all(&self.export_dir)?;

        let mut staged = tempfile::NamedTempFile::new_in(&self.export_dir)?;
        staged.write_all(document)?;
        staged.flush()?;
        let target = self.export_dir.join(&file_name);
        staged
            .persist(&target)
            .map_err(|e| PhotoPdfError::Bridge(format!("export {}: {}", target.display(), e.error)))?;

        info!(path = %target.display(), "document exported");
        Ok(())
    }
}

/// Keep only the final path component and fall back to `document.pdf`.
fn sanitise_file_name(suggested: &str) -> String {
    let name = suggested
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        "document.pdf".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> (tempfile::TempDir, DesktopBridge) {
        let dir = tempfile::tempdir().unwrap();
        let bridge = DesktopBridge::in_data_dir(dir.path());
        (dir, bridge)
    }

    #[test]
    fn missing_inbox_is_a_cancelled_pick() {
        let (_dir, bridge) = bridge();
        assert!(bridge.pick_images(0).unwrap().is_none());
    }

    #[test]
    fn inbox_images_come_back_in_name_order() {
        let (_dir, bridge) = bridge();
        std::fs::create_dir_all(bridge.inbox()).unwrap();
        std::fs::write(bridge.inbox().join("b.png"), b"second").unwrap();
        std::fs::write(bridge.inbox().join("a.JPG"), b"first").unwrap();
        std::fs::write(bridge.inbox().join("notes.txt"), b"ignored").unwrap();

        let picked = bridge.pick_images(0).unwrap().unwrap();
        assert_eq!(picked, vec![b"first".to_vec(), b"second".to_vec()]);

        let limited = bridge.pick_images(1).unwrap().unwrap();
        assert_eq!(limited, vec![b"first".to_vec()]);
    }

    #[test]
    fn share_writes_into_export_dir() {
        let (_dir, bridge) = bridge();
        bridge.share_document(b"%PDF-1.5", "document.pdf").unwrap();
        let written = std::fs::read(bridge.export_dir().join("document.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.5");

        // A second share replaces the first.
        bridge.share_document(b"%PDF-1.7", "document.pdf").unwrap();
        let written = std::fs::read(bridge.export_dir().join("document.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.7");
    }

    #[test]
    fn file_names_cannot_escape_export_dir() {
        assert_eq!(sanitise_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitise_file_name("dir\\scan.pdf"), "scan.pdf");
        assert_eq!(sanitise_file_name(""), "document.pdf");
        assert_eq!(sanitise_file_name(".."), "document.pdf");
    }

    #[test]
    fn camera_is_unavailable_on_desktop() {
        let (_dir, bridge) = bridge();
        assert!(matches!(bridge.capture_image(), Err(PhotoPdfError::PlatformUnavailable)));
    }
}
