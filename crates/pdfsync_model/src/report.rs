//! Outcome of one reconciliation pass.

use std::time::Duration;

/// Report produced by one reconciliation pass.
///
/// Immutable once produced; returned to the caller and never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Whether the pass completed without a fatal error.
    pub success: bool,
    /// Number of documents observed locally before the merge.
    pub local_count: usize,
    /// Number of documents observed in the remote listing.
    pub remote_count: usize,
    /// Remote records with no local counterpart.
    pub new_documents: usize,
    /// Remote records that replaced a strictly older local copy.
    pub updated_documents: usize,
    /// Always 0. Reconciliation never removes a record that
    /// disappeared from the remote listing; the field is reserved for
    /// a future tombstone-based mode.
    pub deleted_documents: usize,
    /// Non-fatal errors collected during the pass.
    pub errors: Vec<String>,
    /// Wall-clock duration of the pass.
    pub duration: Duration,
}

impl SyncReport {
    /// Creates an empty, not-yet-successful report.
    pub fn new() -> Self {
        Self::default()
    }
}
