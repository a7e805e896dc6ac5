//! CLI command implementations.

pub mod add;
pub mod list;
pub mod remove;
pub mod stats;
pub mod sync;

use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_store::KeyValueBackend;

/// Prints failures recorded by detached mirror tasks, if any.
///
/// Mirrors run to completion in the background; errors drained here
/// are the ones that finished before the process exits.
pub fn report_mirror_errors<B, G>(service: &DocumentService<B, G>)
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let errors = service.drain_mirror_errors();
    if !errors.is_empty() {
        eprintln!("Remote mirror warnings:");
        for error in errors {
            eprintln!("  {error}");
        }
    }
}
