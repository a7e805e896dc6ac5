//! Remove command implementation.

use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_store::KeyValueBackend;

/// Deletes a document by id.
pub fn run<B, G>(
    service: &DocumentService<B, G>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    if service.delete(id)? {
        println!("Deleted {id}");
    } else {
        println!("No document with id {id}");
    }
    Ok(())
}
