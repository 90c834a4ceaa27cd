// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payload integrity: SHA-256 digests stored beside each PDF payload and
// checked whenever a record is read back.

use photopdf_core::error::PhotoPdfError;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a stored payload.
pub fn content_digest(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Check `payload` against the digest recorded at save time.
pub fn verify_digest(payload: &[u8], recorded: &str) -> Result<(), PhotoPdfError> {
    let actual = content_digest(payload);
    if actual.eq_ignore_ascii_case(recorded) {
        Ok(())
    } else {
        Err(PhotoPdfError::IntegrityMismatch {
            expected: recorded.to_owned(),
            actual,
        })
    }
}
