//! The document service façade.

use crate::config::ServiceConfig;
use crate::error::{ServiceResult, ValidationError};
use crate::merge::merge;
use crate::mirror::MirrorErrors;
use crate::policy::SyncPolicy;
use chrono::Utc;
use pdfsync_gateway::RemoteGateway;
use pdfsync_model::{DocumentFile, DocumentRecord, StatsSnapshot, SyncReport};
use parking_lot::Mutex;
use pdfsync_store::{DocumentStore, KeyValueBackend};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Orchestrates store, gateway and reconciliation behind a stable
/// operation set.
///
/// Construct one instance per process with injected collaborators and
/// share it by reference. Every state-changing operation leaves the
/// local store as the single source of truth before it returns;
/// remote mirroring is decoupled and may complete after the call, or
/// fail without surfacing through the call's result.
///
/// Callers are expected to serialize mutating operations (`add`,
/// `delete`, `force_sync`) against one store: concurrent racing
/// writers follow last-write-wins and may lose an update.
pub struct DocumentService<B: KeyValueBackend, G: RemoteGateway> {
    store: DocumentStore<B>,
    gateway: Arc<G>,
    policy: SyncPolicy,
    config: ServiceConfig,
    mirror_errors: Arc<MirrorErrors>,
    mirrors: Mutex<Vec<JoinHandle<()>>>,
}

impl<B: KeyValueBackend, G: RemoteGateway + 'static> DocumentService<B, G> {
    /// Creates a service over the given backend and gateway.
    pub fn new(backend: B, gateway: G, config: ServiceConfig) -> Self {
        Self {
            store: DocumentStore::new(backend),
            gateway: Arc::new(gateway),
            policy: SyncPolicy::new(config.staleness_interval),
            mirror_errors: Arc::new(MirrorErrors::new(config.mirror_error_capacity)),
            config,
            mirrors: Mutex::new(Vec::new()),
        }
    }

    /// The injected gateway, mostly useful to observe mirrors in
    /// tests.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns all documents, syncing first when forced or stale.
    ///
    /// The read itself never fails outward: a sync failure is logged
    /// and the current local snapshot is returned regardless.
    pub fn list_all(&self, force_sync: bool) -> Vec<DocumentRecord> {
        let stale = self
            .policy
            .is_stale(self.store.read_sync_timestamp(), Utc::now());

        if force_sync || stale {
            if let Err(err) = self.sync_with_remote() {
                tracing::warn!(error = %err, "sync failed, serving local snapshot");
            }
        }

        self.store.load()
    }

    /// Case-insensitive substring search over display name, original
    /// name, description and tags.
    ///
    /// A blank query returns the full current collection without
    /// triggering a fetch; a non-blank query reads through
    /// [`Self::list_all`] and may sync first when stale.
    pub fn search(&self, query: &str) -> Vec<DocumentRecord> {
        let needle = query.trim();
        if needle.is_empty() {
            return self.store.load();
        }

        self.list_all(false)
            .into_iter()
            .filter(|doc| doc.matches(needle))
            .collect()
    }

    /// Looks up a single document by id in the current collection.
    pub fn get(&self, id: &str) -> Option<DocumentRecord> {
        self.list_all(false).into_iter().find(|doc| doc.id == id)
    }

    /// Validates and adds a document, then fires a detached
    /// best-effort remote upload.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] when the file is empty, larger than the
    /// configured maximum or not named `*.pdf`; storage errors when
    /// the collection cannot be persisted. Either way no state
    /// changes on failure.
    pub fn add(
        &self,
        file: DocumentFile,
        custom_name: Option<&str>,
    ) -> ServiceResult<DocumentRecord> {
        self.validate(&file)?;

        let record = DocumentRecord::new_local(&file, custom_name, Utc::now());

        let mut documents = self.store.load();
        documents.push(record.clone());
        self.store.save(&documents)?;

        tracing::info!(id = %record.id, name = %record.display_name, "document added");
        self.spawn_upload(file, record.clone());

        Ok(record)
    }

    /// Removes a document from the local collection.
    ///
    /// Returns `false` when the id is absent (a no-op, not an error).
    /// On success the removal is persisted before a detached
    /// best-effort remote delete is fired; the local deletion is
    /// authoritative and is never reversed by a mirror failure.
    ///
    /// # Errors
    ///
    /// Storage errors when the shrunken collection cannot be
    /// persisted.
    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        let documents = self.store.load();
        let initial_len = documents.len();

        let remaining: Vec<DocumentRecord> =
            documents.into_iter().filter(|doc| doc.id != id).collect();

        if remaining.len() == initial_len {
            tracing::debug!(id, "delete requested for unknown document");
            return Ok(false);
        }

        self.store.save(&remaining)?;
        tracing::info!(id, "document deleted locally");
        self.spawn_remove(id.to_string());

        Ok(true)
    }

    /// Computes fresh statistics from the current local collection.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::compute(
            &self.store.load(),
            self.store.read_sync_timestamp(),
            Utc::now(),
        )
    }

    /// Unconditionally runs a reconciliation pass.
    ///
    /// # Errors
    ///
    /// Only local-storage write failures raise; every other failure
    /// is collected into the report's error list.
    pub fn force_sync(&self) -> ServiceResult<SyncReport> {
        self.sync_with_remote()
    }

    /// Wipes the local collection and the sync timestamp.
    ///
    /// # Errors
    ///
    /// Storage errors from the underlying backend.
    pub fn clear_cache(&self) -> ServiceResult<()> {
        self.store.clear()?;
        tracing::info!("local cache cleared");
        Ok(())
    }

    /// Drains failures recorded by detached mirror tasks, oldest
    /// first.
    pub fn drain_mirror_errors(&self) -> Vec<String> {
        self.mirror_errors.drain()
    }

    /// Waits for outstanding mirror tasks to finish.
    ///
    /// For orderly shutdown: the operations that fired the mirrors
    /// never await them, but a process exiting right after a mutation
    /// would otherwise kill the mirror mid-flight. Failures still go
    /// to the mirror-error queue, never to the caller.
    pub fn flush_mirrors(&self) {
        let handles: Vec<_> = self.mirrors.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.join();
        }
    }

    /// One reconciliation pass: pull, merge, persist.
    ///
    /// A listing failure degrades to an empty remote set and is
    /// recorded in the report. An empty remote while local data
    /// exists finishes in local-only mode without persisting or
    /// refreshing the sync timestamp, so the next read will retry the
    /// remote.
    fn sync_with_remote(&self) -> ServiceResult<SyncReport> {
        let start = Instant::now();
        let mut report = SyncReport::new();

        let local = self.store.load();
        report.local_count = local.len();

        let remote = match self.gateway.list() {
            Ok(remote) => remote,
            Err(err) => {
                tracing::warn!(error = %err, "remote listing failed, degrading to empty");
                report.errors.push(err.to_string());
                Vec::new()
            }
        };
        report.remote_count = remote.len();

        if remote.is_empty() && !local.is_empty() {
            tracing::info!(local = report.local_count, "local-only mode, keeping local data");
            report.success = true;
            report.duration = start.elapsed();
            return Ok(report);
        }

        let (merged, stats) = merge(local, remote);
        report.new_documents = stats.new_documents;
        report.updated_documents = stats.updated_documents;
        report.deleted_documents = stats.deleted_documents;

        self.store.save(&merged)?;
        self.store.write_sync_timestamp(Utc::now())?;

        report.success = true;
        report.duration = start.elapsed();
        tracing::info!(
            new = report.new_documents,
            updated = report.updated_documents,
            total = report.local_count + report.new_documents,
            "sync completed"
        );

        Ok(report)
    }

    fn validate(&self, file: &DocumentFile) -> Result<(), ValidationError> {
        if file.bytes.is_empty() {
            return Err(ValidationError::EmptyFile);
        }
        if file.size() > self.config.max_file_size {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                max: self.config.max_file_size,
            });
        }
        if !file.file_name.to_lowercase().ends_with(".pdf") {
            return Err(ValidationError::NotPdf {
                file_name: file.file_name.clone(),
            });
        }
        Ok(())
    }

    /// Fires a detached best-effort upload. Never joined; failures go
    /// to the mirror-error queue.
    fn spawn_upload(&self, file: DocumentFile, record: DocumentRecord) {
        let gateway = Arc::clone(&self.gateway);
        let errors = Arc::clone(&self.mirror_errors);
        self.track(std::thread::spawn(move || {
            if let Err(err) = gateway.upload(&file, &record) {
                tracing::warn!(id = %record.id, error = %err, "best-effort upload failed");
                errors.push(format!("upload {}: {err}", record.id));
            }
        }));
    }

    /// Fires a detached best-effort remote delete.
    fn spawn_remove(&self, id: String) {
        let gateway = Arc::clone(&self.gateway);
        let errors = Arc::clone(&self.mirror_errors);
        self.track(std::thread::spawn(move || {
            if let Err(err) = gateway.remove(&id) {
                tracing::warn!(id = %id, error = %err, "best-effort remote delete failed");
                errors.push(format!("delete {id}: {err}"));
            }
        }));
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut mirrors = self.mirrors.lock();
        mirrors.retain(|h| !h.is_finished());
        mirrors.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use pdfsync_gateway::MockGateway;
    use pdfsync_store::MemoryBackend;

    fn service() -> DocumentService<MemoryBackend, MockGateway> {
        DocumentService::new(MemoryBackend::new(), MockGateway::new(), ServiceConfig::new())
    }

    fn pdf(name: &str, len: usize) -> DocumentFile {
        DocumentFile::new(name, vec![0u8; len])
    }

    #[test]
    fn add_rejects_empty_file() {
        let err = service().add(pdf("empty.pdf", 0), None).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn add_rejects_oversized_file() {
        let service = DocumentService::new(
            MemoryBackend::new(),
            MockGateway::new(),
            ServiceConfig::new().with_max_file_size(16),
        );
        let err = service.add(pdf("big.pdf", 17), None).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TooLarge { size: 17, max: 16 })
        ));
    }

    #[test]
    fn add_rejects_wrong_extension() {
        let err = service().add(pdf("notes.txt", 4), None).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::NotPdf { .. })
        ));
    }

    #[test]
    fn add_accepts_uppercase_extension() {
        let service = service();
        let record = service.add(pdf("SCAN.PDF", 4), None).unwrap();
        assert_eq!(record.size_bytes, 4);
    }

    #[test]
    fn failed_add_changes_nothing() {
        let service = service();
        let _ = service.add(pdf("bad.txt", 4), None);
        assert!(service.search("").is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let service = service();
        let record = service.add(pdf("doc.pdf", 4), None).unwrap();

        assert_eq!(service.get(&record.id), Some(record));
        assert_eq!(service.get("missing"), None);
    }

    #[test]
    fn delete_missing_returns_false() {
        let service = service();
        service.add(pdf("doc.pdf", 4), None).unwrap();

        assert!(!service.delete("nonexistent").unwrap());
        assert_eq!(service.search("").len(), 1);
    }
}
