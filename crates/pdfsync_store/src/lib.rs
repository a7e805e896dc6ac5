//! # pdfsync Store
//!
//! Persistent local store for the pdfsync document collection.
//!
//! This crate provides the lowest-level persistence abstraction:
//! backends are **opaque string stores** keyed by a small fixed set of
//! keys. They do not interpret what they hold.
//!
//! ## Design Principles
//!
//! - Backends expose exactly `get`, `set` and `remove_many`
//! - No durability ordering beyond "last writer wins"
//! - Must be `Send + Sync` so detached mirror tasks can share them
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - for tests and ephemeral collections
//! - [`FileBackend`] - one file per key under a directory, written
//!   atomically from the reader's perspective
//!
//! [`DocumentStore`] layers the document collection and the last-sync
//! timestamp on top of a backend: read faults degrade to "no local
//! data", write faults propagate.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod documents;
mod error;
mod file;
mod memory;

pub use backend::KeyValueBackend;
pub use documents::{DocumentStore, DOCUMENTS_KEY, SYNC_TIMESTAMP_KEY};
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
