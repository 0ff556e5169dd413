//! Pickpool API Server Binary
//!
//! Loads configuration, opens the contest data directory, and serves
//! the REST surface until shutdown.

use clap::Parser;
use pickpool::api::server::{ApiServer, ServerConfig};
use pickpool::config::ConfigLoader;
use pickpool::storage::JsonStore;

#[derive(Parser, Debug)]
#[command(name = "pickpool")]
#[command(about = "Survivor-pool pick-tracking API server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// API server host (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// API server port (overrides configuration)
    #[arg(long)]
    port: Option<u16>,

    /// Contest data directory (overrides configuration)
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickpool=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(host) = args.host {
        config.api.listen_address = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    let store = JsonStore::open(&config.storage.data_dir, &config.contest.admin_token)?;

    let server_config = ServerConfig {
        host: config.api.listen_address,
        port: config.api.port,
        allowed_origins: config.api.cors_origins,
        request_timeout_secs: config.api.request_timeout_secs,
        ..Default::default()
    };

    ApiServer::new(server_config, store).run().await
}
