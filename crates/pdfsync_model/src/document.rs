//! The document record and incoming file payload.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed discriminator for every record tracked by the engine.
pub const DOCUMENT_KIND: &str = "pdf";

/// MIME type of every tracked document.
pub const DOCUMENT_MIME_TYPE: &str = "application/pdf";

/// One tracked document, stable across local and remote representations.
///
/// `id` is the primary key: a reconciliation pass never emits two
/// records sharing an id. `uploaded_at` is the sole freshness signal
/// used to resolve a conflict between a local and a remote record.
///
/// A record that was created locally and never successfully mirrored
/// has no `download_url`/`view_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Globally unique identifier.
    pub id: String,
    /// Human-facing name.
    pub display_name: String,
    /// Source filename before normalization, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Size of the document content in bytes (0 when unknown).
    #[serde(default)]
    pub size_bytes: u64,
    /// When the document was uploaded. The freshness signal.
    pub uploaded_at: DateTime<Utc>,
    /// Remote download URL, absent until mirrored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Remote view URL, absent until mirrored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
    /// Free-text tags. Insertion order is irrelevant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Discriminator constant, always [`DOCUMENT_KIND`].
    #[serde(default = "default_kind")]
    pub kind: String,
    /// MIME type, always [`DOCUMENT_MIME_TYPE`].
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_kind() -> String {
    DOCUMENT_KIND.to_string()
}

fn default_mime_type() -> String {
    DOCUMENT_MIME_TYPE.to_string()
}

impl DocumentRecord {
    /// Creates a record for a freshly added local file.
    ///
    /// The record carries no remote URLs until a mirror succeeds.
    pub fn new_local(
        file: &DocumentFile,
        custom_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let display_name = custom_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_display_name(&file.file_name));

        Self {
            id: generate_document_id(now),
            display_name,
            original_name: Some(file.file_name.clone()),
            size_bytes: file.bytes.len() as u64,
            uploaded_at: now,
            download_url: None,
            view_url: None,
            tags: derive_tags(&file.file_name),
            description: None,
            kind: default_kind(),
            mime_type: default_mime_type(),
        }
    }

    /// Returns true if any searchable field contains `needle`.
    ///
    /// Matching is case-insensitive and substring-based over the
    /// display name, original name, description and tags.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.display_name.to_lowercase().contains(&needle)
            || self
                .original_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
    }
}

/// An incoming file payload handed to the add operation.
///
/// The content is a [`Bytes`] so detached mirror tasks can clone it
/// cheaply.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// Original filename, extension included.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Bytes,
}

impl DocumentFile {
    /// Creates a new file payload.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Content size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Generates a unique local document id.
///
/// The id embeds the creation instant followed by a random suffix,
/// e.g. `pdf_1714651230123_9f2c1b0a`.
pub fn generate_document_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("pdf_{}_{}", now.timestamp_millis(), &suffix[..8])
}

/// Derives a default display name by stripping the final extension.
pub fn default_display_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    }
}

/// Derives tags from a filename.
///
/// Keyword tags follow the upstream document categories; the `date`
/// tag marks names carrying a four-digit year.
pub fn derive_tags(file_name: &str) -> Vec<String> {
    let lower = file_name.to_lowercase();
    let mut tags = Vec::new();

    for keyword in ["facture", "contrat", "rapport"] {
        if lower.contains(keyword) {
            tags.push(keyword.to_string());
        }
    }

    if contains_year(file_name) {
        tags.push("date".to_string());
    }

    tags
}

/// Returns true if the name contains four consecutive ASCII digits.
fn contains_year(name: &str) -> bool {
    let mut run = 0usize;
    for c in name.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= 4 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(name: &str, len: usize) -> DocumentFile {
        DocumentFile::new(name, vec![0u8; len])
    }

    #[test]
    fn new_local_defaults_name_from_filename() {
        let file = sample_file("rapport_2024.pdf", 10);
        let record = DocumentRecord::new_local(&file, None, Utc::now());

        assert_eq!(record.display_name, "rapport_2024");
        assert_eq!(record.original_name.as_deref(), Some("rapport_2024.pdf"));
        assert_eq!(record.size_bytes, 10);
        assert!(record.download_url.is_none());
        assert!(record.view_url.is_none());
        assert_eq!(record.kind, DOCUMENT_KIND);
        assert_eq!(record.mime_type, DOCUMENT_MIME_TYPE);
    }

    #[test]
    fn new_local_prefers_custom_name() {
        let file = sample_file("scan001.pdf", 1);
        let record = DocumentRecord::new_local(&file, Some("Bail 2024"), Utc::now());
        assert_eq!(record.display_name, "Bail 2024");

        // Blank custom names fall back to the filename
        let record = DocumentRecord::new_local(&file, Some("   "), Utc::now());
        assert_eq!(record.display_name, "scan001");
    }

    #[test]
    fn generated_ids_are_unique() {
        let now = Utc::now();
        let a = generate_document_id(now);
        let b = generate_document_id(now);
        assert!(a.starts_with("pdf_"));
        assert_ne!(a, b);
    }

    #[test]
    fn derive_tags_keywords_and_year() {
        assert_eq!(
            derive_tags("Facture_EDF_2023.pdf"),
            vec!["facture".to_string(), "date".to_string()]
        );
        assert_eq!(derive_tags("contrat-location.pdf"), vec!["contrat"]);
        assert!(derive_tags("notes.pdf").is_empty());
        // Three digits is not a year
        assert!(derive_tags("doc123.pdf").is_empty());
    }

    #[test]
    fn default_display_name_strips_only_final_extension() {
        assert_eq!(default_display_name("a.b.pdf"), "a.b");
        assert_eq!(default_display_name("noext"), "noext");
        // A leading dot is not an extension separator
        assert_eq!(default_display_name(".hidden"), ".hidden");
    }

    #[test]
    fn matches_is_case_insensitive_over_all_fields() {
        let file = sample_file("Facture_Mars.pdf", 4);
        let mut record = DocumentRecord::new_local(&file, None, Utc::now());
        record.description = Some("Électricité mars".to_string());
        record.tags = vec!["Facture".to_string()];

        assert!(record.matches("fact"));
        assert!(record.matches("MARS"));
        assert!(record.matches("facture_mars"));
        assert!(!record.matches("quittance"));
    }

    #[test]
    fn serde_round_trip_uses_camel_case() {
        let file = sample_file("doc.pdf", 2);
        let record = DocumentRecord::new_local(&file, None, Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("displayName").is_some());
        assert!(json.get("sizeBytes").is_some());
        assert!(json.get("uploadedAt").is_some());
        assert!(json.get("mimeType").is_some());

        let back: DocumentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
