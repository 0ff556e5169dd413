//! API Server
//!
//! Server setup with the shared middleware stack and graceful shutdown.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware},
    routes::create_router,
};
use crate::storage::JsonStore;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Contest API server
pub struct ApiServer {
    config: ServerConfig,
    store: JsonStore,
}

impl ApiServer {
    pub fn new(config: ServerConfig, store: JsonStore) -> Self {
        Self { config, store }
    }

    /// Start the API server
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.create_app();
        let addr = self.get_socket_addr()?;

        info!("🏀 Starting Pickpool API Server");
        info!("   Listen: http://{}", addr);
        self.log_server_info();

        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("✅ API Server running");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("🛑 API Server stopped gracefully");
        Ok(())
    }

    /// Create the application with the full middleware stack
    fn create_app(&self) -> axum::Router {
        let state = Arc::new(AppState::new(self.store.clone()));

        create_router(state)
            // Request ID middleware (first for tracing)
            .layer(axum::middleware::from_fn(request_id_middleware))
            // CORS layer (before timeout to handle preflight)
            .layer(create_cors_layer(self.config.allowed_origins.clone()))
            // Timeout layer
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.request_timeout_secs)))
            // Tracing layer (last for complete request tracing)
            .layer(TraceLayer::new_for_http())
    }

    /// Get socket address from config
    fn get_socket_addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error>> {
        Ok(SocketAddr::from((self.config.host.parse::<std::net::IpAddr>()?, self.config.port)))
    }

    /// Log server information
    fn log_server_info(&self) {
        info!("📋 Server Configuration:");
        info!("   Version: {}", self.config.version);
        info!("   Data dir: {}", self.store.data_dir().display());
        info!("   CORS: {:?}", self.config.allowed_origins);
        info!("   Request timeout: {}s", self.config.request_timeout_secs);

        info!("📊 Available endpoints:");
        info!("   GET    /health                     - Health check");
        info!("   GET    /status                     - Contest status");
        info!("   GET    /players                    - Player list");
        info!("   GET    /players/:id                - Player detail");
        info!("   POST   /players/:id/picks          - Submit picks");
        info!("   GET    /games/:day                 - Day's games");
        info!("   POST   /admin/players              - Create player");
        info!("   PATCH  /admin/players/:id          - Update player");
        info!("   DELETE /admin/players/:id          - Delete player");
        info!("   PUT    /admin/games/:day           - Replace day's games");
        info!("   PATCH  /admin/games/:day/:game_id  - Update game result");
        info!("   GET    /admin/config               - Read contest config");
        info!("   PUT    /admin/config               - Update contest config");
        info!("   POST   /admin/process/:day         - Process day results");
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
