//! Add command implementation.

use std::path::Path;

use bytes::Bytes;
use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_model::DocumentFile;
use pdfsync_store::KeyValueBackend;

/// Reads a file from disk and adds it to the collection.
pub fn run<B, G>(
    service: &DocumentService<B, G>,
    path: &Path,
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("invalid file path: {}", path.display()))?
        .to_string();
    let bytes = Bytes::from(std::fs::read(path)?);

    let file = DocumentFile::new(file_name, bytes);
    let record = service.add(file, name)?;

    println!("Added {} ({})", record.display_name, record.id);
    Ok(())
}
