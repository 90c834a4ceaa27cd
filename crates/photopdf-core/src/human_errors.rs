// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every failure the core can report ends up as a short message shown to the
// user. Nothing is retried automatically; the severity only drives how the
// UI presents the message.

use crate::error::PhotoPdfError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying the same thing again (storage hiccup, I/O error).
    Transient,
    /// The user has to change something first (pick images, select more documents).
    ActionRequired,
    /// The input itself is unusable (damaged file, unsupported image).
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}

/// Convert a `PhotoPdfError` into a `HumanError` suitable for an alert.
pub fn humanize_error(err: &PhotoPdfError) -> HumanError {
    match err {
        PhotoPdfError::EmptyInput => HumanError::new(
            "There are no images to make a PDF from.",
            "Add at least one photo, then try again.",
            Severity::ActionRequired,
        ),

        PhotoPdfError::IndexOutOfRange { page_count, .. } => HumanError::new(
            "That page doesn't exist.",
            format!("This document has {page_count} pages. Pick one of them and try again."),
            Severity::ActionRequired,
        ),

        PhotoPdfError::InsufficientSelection { .. } => HumanError::new(
            "Select at least two documents to merge.",
            "Tap the documents you want to combine, then choose Merge.",
            Severity::ActionRequired,
        ),

        PhotoPdfError::Decode(_) => HumanError::new(
            "This document can't be opened.",
            "The saved file may be damaged. Try deleting it and creating it again.",
            Severity::Permanent,
        ),

        PhotoPdfError::Pdf(_) => HumanError::new(
            "The PDF couldn't be created.",
            "Try again with fewer or smaller photos.",
            Severity::Transient,
        ),

        PhotoPdfError::Image(_) => HumanError::new(
            "There's a problem with one of the images.",
            "The image may be damaged or in an unusual format. Try a JPEG or PNG instead.",
            Severity::Permanent,
        ),

        PhotoPdfError::Store(_) => HumanError::new(
            "The document couldn't be saved.",
            "Try again. If this keeps happening, your device's storage may be full.",
            Severity::Transient,
        ),

        PhotoPdfError::NotFound(_) => HumanError::new(
            "That document is no longer available.",
            "It may have been deleted. Refresh the list and try again.",
            Severity::ActionRequired,
        ),

        PhotoPdfError::IntegrityMismatch { .. } => HumanError::new(
            "This saved document has been damaged.",
            "The stored copy doesn't match what was saved. Delete it and create it again.",
            Severity::Permanent,
        ),

        PhotoPdfError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError::new(
                    "The file couldn't be found.",
                    "It may have been moved or deleted. Try choosing the file again.",
                    Severity::ActionRequired,
                )
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError::new(
                    "The app doesn't have permission to use that file.",
                    "Check the app's permissions in your device settings.",
                    Severity::ActionRequired,
                )
            } else {
                HumanError::new(
                    "There was a problem reading or writing a file.",
                    "Try again. If this keeps happening, your device's storage may be full.",
                    Severity::Transient,
                )
            }
        }

        PhotoPdfError::Serialization(_) => HumanError::new(
            "The app had an internal data problem.",
            "Try again. If this keeps happening, please report it.",
            Severity::Transient,
        ),

        PhotoPdfError::Bridge(_) => HumanError::new(
            "A device feature didn't work.",
            "Try again. Some features may not be available on all devices.",
            Severity::Transient,
        ),

        PhotoPdfError::PlatformUnavailable => HumanError::new(
            "This feature isn't available on your device.",
            "Some features require a phone or tablet with a camera or photo library.",
            Severity::Permanent,
        ),

        PhotoPdfError::Cancelled => HumanError::new(
            "Nothing was changed.",
            "The action was cancelled.",
            Severity::ActionRequired,
        ),
    }
}
