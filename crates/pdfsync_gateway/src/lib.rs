//! # pdfsync Gateway
//!
//! Remote gateway for pdfsync: all network I/O behind three
//! operations so failures cannot propagate uncontrolled.
//!
//! ## Architecture
//!
//! - [`RemoteGateway`] - the seam the engine consumes: `list`,
//!   `upload`, `remove`
//! - [`HttpClient`] - minimal HTTP abstraction so different clients
//!   (or loopback test servers) can back the gateway
//! - [`HttpGateway`] - maps the remote endpoints onto an
//!   [`HttpClient`], degrading 403/404/marker listings to empty
//! - [`ReqwestClient`] - concrete blocking client with a bounded
//!   timeout and optional bearer token
//! - [`MockGateway`] - scriptable gateway for tests
//!
//! ## Key Invariants
//!
//! - A listing failure yields an empty remote set, never a crash of
//!   the sync pass
//! - Upload and delete are best-effort: failures are reported, not
//!   retried here
//! - No call outlives the configured transport timeout

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
mod gateway;
mod http;

pub use client::ReqwestClient;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{MockGateway, RemoteGateway};
pub use http::{GatewayConfig, HttpClient, HttpGateway, HttpResponse, MultipartUpload};
