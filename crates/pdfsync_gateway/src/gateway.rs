//! The remote gateway seam and a scriptable mock.

use crate::error::{GatewayError, GatewayResult};
use parking_lot::Mutex;
use pdfsync_model::{DocumentFile, DocumentRecord};

/// Isolates all network I/O behind three operations.
///
/// `list` feeds reconciliation; `upload` and `remove` are best-effort
/// mirrors fired after a local mutation. Implementations must bound
/// every call with the transport's own timeout; retry loops do not
/// belong here.
pub trait RemoteGateway: Send + Sync {
    /// Fetches the remote document listing.
    ///
    /// HTTP-backed implementations degrade every listing failure to an
    /// empty result; an `Err` from other implementations is still
    /// absorbed by the engine into an empty remote set.
    fn list(&self) -> GatewayResult<Vec<DocumentRecord>>;

    /// Uploads a document's content and metadata. Best-effort.
    fn upload(&self, file: &DocumentFile, record: &DocumentRecord) -> GatewayResult<()>;

    /// Deletes a remote document by id. Best-effort.
    fn remove(&self, id: &str) -> GatewayResult<()>;
}

/// A scriptable gateway for tests.
///
/// Responses are set up front; every upload and remove call is
/// recorded so tests can observe detached mirror activity.
#[derive(Debug, Default)]
pub struct MockGateway {
    list_result: Mutex<Option<GatewayResult<Vec<DocumentRecord>>>>,
    fail_mirrors: Mutex<Option<String>>,
    uploads: Mutex<Vec<DocumentRecord>>,
    removals: Mutex<Vec<String>>,
}

impl MockGateway {
    /// Creates a mock that lists an empty remote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the documents the next `list` calls return.
    pub fn set_listing(&self, documents: Vec<DocumentRecord>) {
        *self.list_result.lock() = Some(Ok(documents));
    }

    /// Makes `list` return a transport error.
    pub fn fail_listing(&self, message: impl Into<String>) {
        *self.list_result.lock() = Some(Err(GatewayError::transport(message)));
    }

    /// Makes `upload` and `remove` fail with a transport error.
    pub fn fail_mirrors(&self, message: impl Into<String>) {
        *self.fail_mirrors.lock() = Some(message.into());
    }

    /// Records of every uploaded document.
    pub fn uploads(&self) -> Vec<DocumentRecord> {
        self.uploads.lock().clone()
    }

    /// Ids passed to `remove`, in call order.
    pub fn removals(&self) -> Vec<String> {
        self.removals.lock().clone()
    }
}

impl RemoteGateway for MockGateway {
    fn list(&self) -> GatewayResult<Vec<DocumentRecord>> {
        match &*self.list_result.lock() {
            Some(Ok(documents)) => Ok(documents.clone()),
            Some(Err(GatewayError::Transport { message, retryable })) => {
                Err(GatewayError::Transport {
                    message: message.clone(),
                    retryable: *retryable,
                })
            }
            Some(Err(GatewayError::Status { operation, status })) => Err(GatewayError::Status {
                operation,
                status: *status,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn upload(&self, _file: &DocumentFile, record: &DocumentRecord) -> GatewayResult<()> {
        if let Some(message) = self.fail_mirrors.lock().clone() {
            return Err(GatewayError::transport(message));
        }
        self.uploads.lock().push(record.clone());
        Ok(())
    }

    fn remove(&self, id: &str) -> GatewayResult<()> {
        if let Some(message) = self.fail_mirrors.lock().clone() {
            return Err(GatewayError::transport(message));
        }
        self.removals.lock().push(id.to_string());
        Ok(())
    }
}
