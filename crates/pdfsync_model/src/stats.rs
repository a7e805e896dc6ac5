//! Derived statistics over the local collection.

use crate::DocumentRecord;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A snapshot of collection statistics.
///
/// Recomputed on demand from the current local collection; never
/// cached by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Total number of documents.
    pub total_documents: usize,
    /// Sum of all document sizes in bytes.
    pub total_size_bytes: u64,
    /// Average document size in bytes (0 when the collection is empty).
    pub average_size_bytes: u64,
    /// When this snapshot was computed.
    pub last_updated: DateTime<Utc>,
    /// Timestamp of the last successful sync, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    /// Documents uploaded within the last 7 days.
    pub added_this_week: usize,
    /// Documents uploaded within the last 30 days.
    pub added_this_month: usize,
}

impl StatsSnapshot {
    /// Computes a snapshot from the current collection.
    pub fn compute(
        documents: &[DocumentRecord],
        last_sync: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let total_documents = documents.len();
        let total_size_bytes: u64 = documents.iter().map(|d| d.size_bytes).sum();
        let average_size_bytes = if total_documents == 0 {
            0
        } else {
            total_size_bytes / total_documents as u64
        };

        let week_start = now - Duration::days(7);
        let month_start = now - Duration::days(30);

        Self {
            total_documents,
            total_size_bytes,
            average_size_bytes,
            last_updated: now,
            last_sync,
            added_this_week: documents
                .iter()
                .filter(|d| d.uploaded_at >= week_start)
                .count(),
            added_this_month: documents
                .iter()
                .filter(|d| d.uploaded_at >= month_start)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentFile;

    fn doc(size: u64, uploaded_at: DateTime<Utc>) -> DocumentRecord {
        let file = DocumentFile::new("doc.pdf", vec![0u8; size as usize]);
        let mut record = DocumentRecord::new_local(&file, None, uploaded_at);
        record.size_bytes = size;
        record
    }

    #[test]
    fn totals_and_average() {
        let now = Utc::now();
        let docs = vec![doc(100, now), doc(300, now)];
        let stats = StatsSnapshot::compute(&docs, None, now);

        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_size_bytes, 400);
        assert_eq!(stats.average_size_bytes, 200);
    }

    #[test]
    fn empty_collection_has_zero_average() {
        let stats = StatsSnapshot::compute(&[], None, Utc::now());
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.average_size_bytes, 0);
    }

    #[test]
    fn rolling_windows() {
        let now = Utc::now();
        let docs = vec![
            doc(1, now - Duration::days(1)),
            doc(1, now - Duration::days(10)),
            doc(1, now - Duration::days(40)),
        ];
        let stats = StatsSnapshot::compute(&docs, None, now);

        assert_eq!(stats.added_this_week, 1);
        assert_eq!(stats.added_this_month, 2);
    }

    #[test]
    fn carries_last_sync() {
        let now = Utc::now();
        let sync = now - Duration::minutes(3);
        let stats = StatsSnapshot::compute(&[], Some(sync), now);
        assert_eq!(stats.last_sync, Some(sync));
        assert_eq!(stats.last_updated, now);
    }
}
