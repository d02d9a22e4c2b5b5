use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use mcp_stays::adapters::booking_ledger::BookingLedger;
use mcp_stays::adapters::memory_catalog::InMemoryCatalog;
use mcp_stays::adapters::reservations_api::ReservationsApi;
use mcp_stays::config::load_config;
use mcp_stays::mcp::server::StaysMcpServer;
use mcp_stays::ports::availability::AvailabilityClient;
use mcp_stays::search::service::SearchService;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        exe_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    // Look in the directory where the binary is
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting mcp-stays server");

    // Load configuration
    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    // Load the property catalog
    let catalog_path = Path::new(&config.catalog.path);
    let catalog = if catalog_path.exists() {
        InMemoryCatalog::from_json_file(catalog_path)?
    } else {
        tracing::warn!(
            "Catalog file not found at {}, starting with an empty catalog",
            catalog_path.display()
        );
        InMemoryCatalog::new(Vec::new())
    };
    tracing::info!("Loaded {} properties", catalog.len());

    // Pick the reservation collaborator: remote service when an endpoint is
    // configured, otherwise the local booking ledger.
    let availability: Arc<dyn AvailabilityClient> = match config.availability.endpoint {
        Some(ref endpoint) => {
            tracing::info!("Using remote reservations service at {endpoint}");
            Arc::new(ReservationsApi::new(endpoint, &config.availability)?)
        }
        None => {
            let bookings_path = Path::new(&config.availability.bookings_path);
            if bookings_path.exists() {
                tracing::info!(
                    "Answering availability from booking ledger at {}",
                    bookings_path.display()
                );
                Arc::new(BookingLedger::from_json_file(bookings_path)?)
            } else {
                tracing::info!("No booking ledger found, every stay reads as available");
                Arc::new(BookingLedger::empty())
            }
        }
    };

    let service = Arc::new(SearchService::new(Arc::new(catalog), availability));
    let server = StaysMcpServer::new(service);

    // Start MCP server over stdio
    let running = server.serve(stdio()).await?;
    running.waiting().await?;

    Ok(())
}
