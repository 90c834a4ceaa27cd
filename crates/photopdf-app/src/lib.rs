// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PhotoPDF: service layer consumed by the platform UI shell.
//
// The shell owns one `AppServices`, keeps an `AppState` snapshot for its
// document list, and drives the generator, reader and merge screens through
// `GeneratorSelection`, `ReaderSession` and `MergeSelection`.

pub mod selection;
pub mod services;
pub mod session;
pub mod state;
pub mod telemetry;

pub use selection::{GeneratorSelection, MergeSelection};
pub use services::app_services::{AppServices, MergeReport};
pub use session::{ReaderSession, SessionOrigin};
pub use state::{AppState, DocumentSummary};
