//! # pdfsync Model
//!
//! Data model shared by the pdfsync crates.
//!
//! This crate defines:
//! - [`DocumentRecord`] - one tracked document, the unit the engine syncs
//! - [`DocumentFile`] - an incoming file payload handed to `add`
//! - [`SyncReport`] - the outcome of one reconciliation pass
//! - [`StatsSnapshot`] - derived statistics over the local collection
//! - [`remote`] - the strict decoding step for remote listing payloads
//!
//! ## Design Principles
//!
//! - Records are plain serde data, no framework types leak through
//! - `uploadedAt` is the sole freshness signal between two records
//!   sharing an id
//! - Remote payloads are decoded defensively: items without a usable
//!   id are skipped, a server-side marker record collapses the whole
//!   listing to empty

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
pub mod remote;
mod report;
mod stats;

pub use document::{
    default_display_name, derive_tags, generate_document_id, DocumentFile, DocumentRecord,
    DOCUMENT_KIND, DOCUMENT_MIME_TYPE,
};
pub use report::SyncReport;
pub use stats::StatsSnapshot;
