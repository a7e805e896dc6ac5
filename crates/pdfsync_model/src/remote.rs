//! Strict decoding of remote listing payloads.
//!
//! The remote listing endpoint returns loosely shaped JSON objects.
//! This module is the single place where those shapes are mapped into
//! [`DocumentRecord`]s. The rules are deliberate:
//!
//! - A malformed or non-array payload decodes to an empty listing.
//! - A server-side informational "marker" record (emitted upstream
//!   when the bucket filters the caller's IP) collapses the whole
//!   listing to empty.
//! - An item without a usable string `id` is logged and skipped.
//! - The display name resolves through a fixed fallback chain:
//!   description, first short tag, original name, name, filename.

use crate::{DocumentRecord, DOCUMENT_KIND, DOCUMENT_MIME_TYPE};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// A tag longer than this is free text, not a usable title.
const SHORT_TAG_MAX_LEN: usize = 32;

/// Decodes a raw listing body into document records.
///
/// Never fails: every degraded input shape maps to an empty or
/// partial listing, so a bad payload can only cost remote visibility,
/// never a sync pass.
pub fn decode_listing(body: &[u8], now: DateTime<Utc>) -> Vec<DocumentRecord> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "malformed remote listing payload, treating as empty");
            return Vec::new();
        }
    };

    let items = match value.as_array() {
        Some(items) => items,
        None => {
            tracing::warn!("remote listing is not a JSON array, treating as empty");
            return Vec::new();
        }
    };

    if items.iter().any(is_marker_record) {
        tracing::warn!("remote listing carries an access-filtered marker, treating as empty");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match decode_item(item, now) {
            Some(record) => {
                if seen.insert(record.id.clone()) {
                    records.push(record);
                } else {
                    tracing::warn!(id = %record.id, "duplicate id in remote listing, skipping");
                }
            }
            None => tracing::warn!(item = %item, "remote item has no usable id, skipping"),
        }
    }
    records
}

/// Recognizes the upstream informational record emitted instead of a
/// real listing when the server's IP is filtered by the bucket.
fn is_marker_record(item: &Value) -> bool {
    str_field(item, "type").as_deref() == Some("info")
        || str_field(item, "status").as_deref() == Some("ip_filtered")
        || str_field(item, "id").as_deref() == Some("ip-filtered-info")
}

/// Decodes a single listing item. Returns `None` when no usable id
/// is present.
fn decode_item(item: &Value, now: DateTime<Utc>) -> Option<DocumentRecord> {
    let id = identifier(item)?;

    let original_name = str_field(item, "originalName");
    let description = str_field(item, "description");
    let tags = decode_tags(item);

    let display_name = display_name(item, &id, description.as_deref(), &tags);

    let download_url = str_field(item, "downloadUrl").or_else(|| str_field(item, "url"));
    let view_url = str_field(item, "viewUrl").or_else(|| download_url.clone());

    Some(DocumentRecord {
        id,
        display_name,
        original_name,
        size_bytes: size_bytes(item),
        uploaded_at: uploaded_at(item).unwrap_or(now),
        download_url,
        view_url,
        tags,
        description,
        kind: DOCUMENT_KIND.to_string(),
        mime_type: DOCUMENT_MIME_TYPE.to_string(),
    })
}

/// Extracts the item id. Numeric ids are stringified; blank ids are
/// rejected.
fn identifier(item: &Value) -> Option<String> {
    match item.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolves the display name through the fallback chain.
fn display_name(item: &Value, id: &str, description: Option<&str>, tags: &[String]) -> String {
    if let Some(desc) = description.map(str::trim).filter(|d| !d.is_empty()) {
        return desc.to_string();
    }
    if let Some(tag) = tags
        .iter()
        .find(|t| !t.trim().is_empty() && t.len() <= SHORT_TAG_MAX_LEN)
    {
        return tag.clone();
    }
    for key in ["originalName", "name", "fileName"] {
        if let Some(name) = str_field(item, key) {
            return name;
        }
    }
    format!("document-{id}")
}

/// Collects tags from either a `tags` array or the upstream
/// `tag1`/`tag2`/`tag3` fields.
fn decode_tags(item: &Value) -> Vec<String> {
    if let Some(Value::Array(values)) = item.get("tags") {
        return values
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != "null")
            .map(str::to_string)
            .collect();
    }

    ["tag1", "tag2", "tag3"]
        .iter()
        .filter_map(|key| str_field(item, key))
        .collect()
}

fn size_bytes(item: &Value) -> u64 {
    for key in ["sizeBytes", "size"] {
        if let Some(size) = item.get(key).and_then(Value::as_u64) {
            return size;
        }
    }
    0
}

/// Parses the upload timestamp: RFC 3339 string or unix epoch millis.
fn uploaded_at(item: &Value) -> Option<DateTime<Utc>> {
    for key in ["uploadedAt", "timestamp"] {
        match item.get(key) {
            Some(Value::String(s)) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                    return Some(parsed.with_timezone(&Utc));
                }
            }
            Some(Value::Number(n)) => {
                if let Some(millis) = n.as_i64() {
                    if let Some(parsed) = Utc.timestamp_millis_opt(millis).single() {
                        return Some(parsed);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns a trimmed, non-blank, non-`"null"` string field.
fn str_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .map(str::to_string)
}
