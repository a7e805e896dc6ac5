//! Sync command implementation.

use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_store::KeyValueBackend;

/// Forces a reconciliation pass and prints the report.
pub fn run<B, G>(service: &DocumentService<B, G>) -> Result<(), Box<dyn std::error::Error>>
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let report = service.force_sync()?;

    let status = if report.success { "ok" } else { "failed" };
    println!(
        "Sync {status} in {:?}: {} local, {} remote, {} new, {} updated",
        report.duration,
        report.local_count,
        report.remote_count,
        report.new_documents,
        report.updated_documents,
    );
    for error in &report.errors {
        eprintln!("warning: {error}");
    }
    Ok(())
}
