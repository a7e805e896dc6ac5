//! # pdfsync Engine
//!
//! Local-first document synchronization engine.
//!
//! This crate provides:
//! - Reconciliation of local and remote collections ([`merge`])
//! - Staleness policy deciding when a sync is due ([`SyncPolicy`])
//! - The [`DocumentService`] façade: list, search, add, delete,
//!   stats, force-sync, clear-cache
//! - A bounded, drainable queue for detached mirror failures
//!   ([`MirrorErrors`])
//!
//! ## Architecture
//!
//! A caller requests documents, the service consults the policy, and
//! if a sync is due the engine pulls the remote listing and merges it
//! with the local collection. The merged set is persisted and
//! returned. Add and delete mutate the local store immediately and
//! fire a detached best-effort remote mirror.
//!
//! ## Key Invariants
//!
//! - The local store is the single source of truth immediately after
//!   every state-changing operation returns
//! - A degraded remote never blocks reading, searching, adding or
//!   deleting against the local cache
//! - Equal freshness timestamps keep the local copy, so an optimistic
//!   local add is never clobbered by a remote echo of itself
//! - A record absent from the remote listing is never deleted locally

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod merge;
mod mirror;
mod policy;
mod service;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult, ValidationError};
pub use merge::{merge, MergeStats};
pub use mirror::MirrorErrors;
pub use policy::SyncPolicy;
pub use service::DocumentService;
