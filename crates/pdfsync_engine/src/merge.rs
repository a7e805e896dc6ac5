//! Reconciliation of local and remote collections.

use pdfsync_model::DocumentRecord;
use std::collections::HashMap;

/// Change statistics produced by one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Remote records with no local counterpart.
    pub new_documents: usize,
    /// Remote records that replaced a strictly older local copy.
    pub updated_documents: usize,
    /// Always 0: reconciliation never deletes by remote omission.
    /// Reserved for a future tombstone-based mode.
    pub deleted_documents: usize,
}

/// Merges a local and a remote collection into one canonical set.
///
/// For each remote record: emit it when it is unknown locally or
/// strictly fresher than the local copy; otherwise keep the local
/// record. Ties keep local, so an optimistic add is never clobbered
/// by a remote echo of itself. Local records without a remote
/// counterpart are emitted unchanged - an empty or degraded remote
/// listing must never cause silent data loss.
///
/// Output order: remote-matched records in remote order, then
/// remaining local-only records in local order. Emitted ids are
/// unique.
pub fn merge(
    local: Vec<DocumentRecord>,
    remote: Vec<DocumentRecord>,
) -> (Vec<DocumentRecord>, MergeStats) {
    let mut stats = MergeStats::default();
    let mut merged = Vec::with_capacity(local.len() + remote.len());

    // Local slots keyed by id; a consumed slot is taken out so the
    // leftover pass preserves local order.
    let mut by_id: HashMap<String, usize> = local
        .iter()
        .enumerate()
        .map(|(idx, doc)| (doc.id.clone(), idx))
        .collect();
    let mut slots: Vec<Option<DocumentRecord>> = local.into_iter().map(Some).collect();

    for remote_doc in remote {
        match by_id.remove(&remote_doc.id) {
            None => {
                stats.new_documents += 1;
                merged.push(remote_doc);
            }
            Some(idx) => {
                let local_doc = slots[idx].take().unwrap_or(remote_doc.clone());
                if remote_doc.uploaded_at > local_doc.uploaded_at {
                    stats.updated_documents += 1;
                    merged.push(remote_doc);
                } else {
                    merged.push(local_doc);
                }
            }
        }
    }

    merged.extend(slots.into_iter().flatten());

    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use pdfsync_model::DocumentFile;
    use proptest::prelude::*;

    fn doc(id: &str, name: &str, uploaded_at: DateTime<Utc>) -> DocumentRecord {
        let file = DocumentFile::new("doc.pdf", vec![0u8; 1]);
        let mut record = DocumentRecord::new_local(&file, Some(name), uploaded_at);
        record.id = id.to_string();
        record
    }

    #[test]
    fn merge_against_self_is_idempotent() {
        let now = Utc::now();
        let local = vec![doc("a", "one", now), doc("b", "two", now)];

        let (merged, stats) = merge(local.clone(), local.clone());

        assert_eq!(merged, local);
        assert_eq!(stats.new_documents, 0);
        assert_eq!(stats.updated_documents, 0);
        assert_eq!(stats.deleted_documents, 0);
    }

    #[test]
    fn local_wins_ties() {
        let now = Utc::now();
        let local = vec![doc("a", "local name", now)];
        let remote = vec![doc("a", "remote name", now)];

        let (merged, stats) = merge(local, remote);

        assert_eq!(merged[0].display_name, "local name");
        assert_eq!(stats.updated_documents, 0);
    }

    #[test]
    fn local_newer_wins() {
        let now = Utc::now();
        let local = vec![doc("a", "local name", now)];
        let remote = vec![doc("a", "remote name", now - Duration::seconds(5))];

        let (merged, stats) = merge(local, remote);

        assert_eq!(merged[0].display_name, "local name");
        assert_eq!(stats.updated_documents, 0);
    }

    #[test]
    fn remote_strictly_newer_wins() {
        let now = Utc::now();
        let local = vec![doc("a", "local name", now)];
        let remote = vec![doc("a", "remote name", now + Duration::seconds(1))];

        let (merged, stats) = merge(local, remote);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].display_name, "remote name");
        assert_eq!(stats.updated_documents, 1);
        assert_eq!(stats.new_documents, 0);
    }

    #[test]
    fn remote_only_records_are_new() {
        let now = Utc::now();
        let (merged, stats) = merge(vec![], vec![doc("r", "remote", now)]);

        assert_eq!(merged.len(), 1);
        assert_eq!(stats.new_documents, 1);
    }

    #[test]
    fn empty_remote_never_deletes_local() {
        let now = Utc::now();
        let local = vec![doc("a", "keep me", now)];

        let (merged, stats) = merge(local.clone(), vec![]);

        assert_eq!(merged, local);
        assert_eq!(stats.deleted_documents, 0);
    }

    #[test]
    fn output_order_is_remote_matched_then_local_only() {
        let now = Utc::now();
        let local = vec![
            doc("l1", "local one", now),
            doc("b", "both", now),
            doc("l2", "local two", now),
        ];
        let remote = vec![doc("r1", "remote one", now), doc("b", "both-remote", now)];

        let (merged, _) = merge(local, remote);

        let ids: Vec<&str> = merged.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "b", "l1", "l2"]);
    }

    #[test]
    fn emitted_ids_are_unique() {
        let now = Utc::now();
        let local = vec![doc("a", "l", now), doc("b", "l", now)];
        let remote = vec![
            doc("a", "r", now + Duration::seconds(1)),
            doc("c", "r", now),
        ];

        let (merged, _) = merge(local, remote);

        let mut ids: Vec<&str> = merged.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), merged.len());
    }

    proptest! {
        /// Reconciling any collection against itself changes nothing.
        #[test]
        fn prop_self_merge_is_identity(ids in proptest::collection::hash_set("[a-z]{1,6}", 0..20)) {
            let now = Utc::now();
            let local: Vec<DocumentRecord> = ids
                .iter()
                .map(|id| doc(id, id, now))
                .collect();

            let (merged, stats) = merge(local.clone(), local.clone());

            prop_assert_eq!(merged, local);
            prop_assert_eq!(stats, MergeStats::default());
        }
    }
}
