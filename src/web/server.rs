//! Web server for pdfdrop.
//!
//! Construction and binding are deliberately separate: `WebServer::new`
//! builds the state and router without touching the network, so tests can
//! exercise the router directly; `run` binds the port and serves.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::storage::FileStore;
use crate::{PdfdropError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from configuration.
    ///
    /// Initializes the file store (creating and absolute-resolving the
    /// upload directory) but does not bind any network resources.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|_| {
                PdfdropError::Config(format!(
                    "invalid server address: {}:{}",
                    config.server.host, config.server.port
                ))
            })?;

        let store = FileStore::new(&config.storage.path)?;
        tracing::info!("file store initialized at {}", store.root().display());

        let app_state = Arc::new(AppState::new(store, config.storage.max_upload_bytes));

        Ok(Self {
            addr,
            app_state,
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Get the configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the application state.
    pub fn app_state(&self) -> Arc<AppState> {
        self.app_state.clone()
    }

    /// Build the router without binding a port.
    pub fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.cors_origins)
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);

        axum::serve(listener, self.router())
            .await
            .map_err(PdfdropError::Io)?;

        Ok(())
    }
}
