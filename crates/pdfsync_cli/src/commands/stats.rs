//! Stats command implementation.

use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_store::KeyValueBackend;

/// Prints collection statistics.
pub fn run<B, G>(
    service: &DocumentService<B, G>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let stats = service.stats();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Documents:        {}", stats.total_documents);
    println!("Total size:       {} bytes", stats.total_size_bytes);
    println!("Average size:     {} bytes", stats.average_size_bytes);
    println!("Added this week:  {}", stats.added_this_week);
    println!("Added this month: {}", stats.added_this_month);
    match stats.last_sync {
        Some(ts) => println!("Last sync:        {}", ts.to_rfc3339()),
        None => println!("Last sync:        never"),
    }
    Ok(())
}
