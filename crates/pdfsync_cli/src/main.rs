//! pdfsync CLI
//!
//! Command-line front end for the local-first document sync engine.
//!
//! # Commands
//!
//! - `list` - show the current collection, syncing first when stale
//! - `search` - filter the collection by a substring
//! - `add` - validate and add a PDF, mirroring it remotely
//! - `rm` - delete a document locally and best-effort remotely
//! - `stats` - collection statistics
//! - `sync` - force a reconciliation pass
//! - `clear-cache` - wipe the local collection and sync timestamp

mod commands;

use clap::{Parser, Subcommand};
use pdfsync_engine::{DocumentService, ServiceConfig};
use pdfsync_gateway::{GatewayConfig, HttpGateway, ReqwestClient};
use pdfsync_store::FileBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The concrete service the CLI drives.
type Service = DocumentService<FileBackend, HttpGateway<ReqwestClient>>;

/// Local-first PDF document synchronization.
#[derive(Parser)]
#[command(name = "pdfsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the local store
    #[arg(global = true, long, default_value = ".pdfsync")]
    store_dir: PathBuf,

    /// Base URL of the remote document store
    #[arg(global = true, long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Bearer token attached to remote requests
    #[arg(global = true, long)]
    token: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current collection
    List {
        /// Run a reconciliation pass first, stale or not
        #[arg(short, long)]
        force_sync: bool,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Filter the collection by a substring
    Search {
        /// Text matched against names, descriptions and tags
        query: String,
    },

    /// Validate and add a PDF file
    Add {
        /// Path to the PDF file
        file: PathBuf,

        /// Display name, defaults to the filename without extension
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a document by id
    Rm {
        /// Document id
        id: String,
    },

    /// Show collection statistics
    Stats {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Force a reconciliation pass
    Sync,

    /// Wipe the local collection and sync timestamp
    ClearCache,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = build_service(&cli)?;

    match cli.command {
        Commands::List { force_sync, format } => {
            commands::list::run(&service, force_sync, &format)?;
        }
        Commands::Search { query } => {
            commands::list::search(&service, &query);
        }
        Commands::Add { file, name } => {
            commands::add::run(&service, &file, name.as_deref())?;
        }
        Commands::Rm { id } => {
            commands::remove::run(&service, &id)?;
        }
        Commands::Stats { format } => {
            commands::stats::run(&service, &format)?;
        }
        Commands::Sync => {
            commands::sync::run(&service)?;
        }
        Commands::ClearCache => {
            service.clear_cache()?;
            println!("Local cache cleared.");
        }
    }

    service.flush_mirrors();
    commands::report_mirror_errors(&service);

    Ok(())
}

fn build_service(cli: &Cli) -> Result<Service, Box<dyn std::error::Error>> {
    let backend = FileBackend::open(&cli.store_dir)?;

    let mut gateway_config = GatewayConfig::new(cli.api_url.clone());
    if let Some(token) = &cli.token {
        gateway_config = gateway_config.with_auth_token(token.clone());
    }
    let client = ReqwestClient::new(&gateway_config)?;
    let gateway = HttpGateway::new(gateway_config, client);

    Ok(DocumentService::new(
        backend,
        gateway,
        ServiceConfig::new(),
    ))
}
