// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PhotoPDF: Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod size;
pub mod types;

pub use config::{AppConfig, DecodePolicy};
pub use error::{PhotoPdfError, Result};
pub use size::format_file_size;
pub use types::*;
