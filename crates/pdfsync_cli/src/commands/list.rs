//! List and search command implementations.

use pdfsync_engine::DocumentService;
use pdfsync_gateway::RemoteGateway;
use pdfsync_model::DocumentRecord;
use pdfsync_store::KeyValueBackend;

/// Runs the list command.
pub fn run<B, G>(
    service: &DocumentService<B, G>,
    force_sync: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let documents = service.list_all(force_sync);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&documents)?),
        _ => print_table(&documents),
    }

    Ok(())
}

/// Runs the search command.
pub fn search<B, G>(service: &DocumentService<B, G>, query: &str)
where
    B: KeyValueBackend,
    G: RemoteGateway + 'static,
{
    let documents = service.search(query);
    if documents.is_empty() {
        println!("No documents match {query:?}.");
        return;
    }
    print_table(&documents);
}

fn print_table(documents: &[DocumentRecord]) {
    if documents.is_empty() {
        println!("No documents.");
        return;
    }

    println!("{:<32} {:<28} {:>10}  {}", "ID", "NAME", "SIZE", "UPLOADED");
    for doc in documents {
        println!(
            "{:<32} {:<28} {:>10}  {}",
            doc.id,
            truncate(&doc.display_name, 28),
            human_size(doc.size_bytes),
            doc.uploaded_at.format("%Y-%m-%d %H:%M"),
        );
    }
    println!("{} document(s)", documents.len());
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    match bytes {
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate("short", 28), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
