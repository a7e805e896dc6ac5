//! Document collection persistence over a key/value backend.

use crate::backend::KeyValueBackend;
use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use pdfsync_model::DocumentRecord;

/// Storage key holding the serialized document collection.
pub const DOCUMENTS_KEY: &str = "pdf_documents";

/// Storage key holding the last successful sync timestamp.
pub const SYNC_TIMESTAMP_KEY: &str = "pdf_last_sync";

/// Durable mapping from fixed keys to the document collection and the
/// last-sync timestamp.
///
/// Read faults (missing value, backend error, undecodable JSON)
/// degrade to "no local data" and never reach the caller; write
/// faults propagate, since they mean the data was not durably saved.
#[derive(Debug)]
pub struct DocumentStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> DocumentStore<B> {
    /// Creates a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Loads the current collection.
    ///
    /// Returns an empty collection when nothing is stored or the
    /// stored value cannot be read or decoded.
    pub fn load(&self) -> Vec<DocumentRecord> {
        let raw = match self.backend.get(DOCUMENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "local collection read failed, degrading to empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(error = %err, "local collection is undecodable, degrading to empty");
                Vec::new()
            }
        }
    }

    /// Overwrites the entire collection.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend write failures.
    pub fn save(&self, documents: &[DocumentRecord]) -> StoreResult<()> {
        let raw = serde_json::to_string(documents)?;
        self.backend.set(DOCUMENTS_KEY, &raw)?;
        tracing::debug!(count = documents.len(), "local collection saved");
        Ok(())
    }

    /// Reads the last successful sync timestamp, if one is recorded.
    pub fn read_sync_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = match self.backend.get(SYNC_TIMESTAMP_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "sync timestamp read failed, treating as never synced");
                return None;
            }
        };

        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(err) => {
                tracing::warn!(error = %err, "sync timestamp is undecodable, treating as never synced");
                None
            }
        }
    }

    /// Records the last successful sync timestamp.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn write_sync_timestamp(&self, at: DateTime<Utc>) -> StoreResult<()> {
        self.backend.set(SYNC_TIMESTAMP_KEY, &at.to_rfc3339())
    }

    /// Removes the collection and the sync timestamp. A full cache
    /// reset.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn clear(&self) -> StoreResult<()> {
        self.backend
            .remove_many(&[DOCUMENTS_KEY, SYNC_TIMESTAMP_KEY])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use pdfsync_model::DocumentFile;

    fn doc(id: &str) -> DocumentRecord {
        let file = DocumentFile::new("doc.pdf", vec![1u8; 4]);
        let mut record = DocumentRecord::new_local(&file, None, Utc::now());
        record.id = id.to_string();
        record
    }

    #[test]
    fn empty_store_loads_empty() {
        let store = DocumentStore::new(MemoryBackend::new());
        assert!(store.load().is_empty());
        assert!(store.read_sync_timestamp().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = DocumentStore::new(MemoryBackend::new());
        let documents = vec![doc("a"), doc("b")];

        store.save(&documents).unwrap();
        assert_eq!(store.load(), documents);
    }

    #[test]
    fn corrupt_collection_degrades_to_empty() {
        let backend = MemoryBackend::with_entries(&[(DOCUMENTS_KEY, "{not json")]);
        let store = DocumentStore::new(backend);
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_timestamp_degrades_to_none() {
        let backend = MemoryBackend::with_entries(&[(SYNC_TIMESTAMP_KEY, "yesterday-ish")]);
        let store = DocumentStore::new(backend);
        assert!(store.read_sync_timestamp().is_none());
    }

    #[test]
    fn sync_timestamp_round_trips() {
        let store = DocumentStore::new(MemoryBackend::new());
        let at = Utc::now();

        store.write_sync_timestamp(at).unwrap();
        assert_eq!(store.read_sync_timestamp(), Some(at));
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = DocumentStore::new(MemoryBackend::new());
        store.save(&[doc("a")]).unwrap();
        store.write_sync_timestamp(Utc::now()).unwrap();

        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert!(store.read_sync_timestamp().is_none());
    }
}
