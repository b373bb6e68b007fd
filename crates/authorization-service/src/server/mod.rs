//! Authorization server.
//!
//! Wires the client directory, random source and consent renderer into the
//! HTTP router and serves it.

pub mod oauth;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use oauth::{ClientDirectory, InMemoryClientDirectory, OsRandomSource};
use transport::AppState;

/// Authorization code server.
pub struct AuthServer {
    state: AppState,
}

impl AuthServer {
    /// Create a server from prepared handler state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Create a server with production collaborators.
    ///
    /// Clients come from the configured registry file, or the demo client
    /// when none is configured.
    ///
    /// # Errors
    ///
    /// Returns error if the registry cannot be loaded or the cookie secret is invalid.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let directory = match &config.clients_file {
            Some(path) => InMemoryClientDirectory::from_json_file(path).await?,
            None => {
                tracing::info!("No client registry configured, seeding demo client");
                InMemoryClientDirectory::with_demo_client()
            }
        };

        let directory: Arc<dyn ClientDirectory> = Arc::new(directory);
        let state = AppState::new(directory, Arc::new(OsRandomSource), config)?;
        Ok(Self::new(state))
    }

    /// Build the HTTP router.
    #[must_use]
    pub fn router(&self) -> Router {
        transport::create_router(self.state.clone())
    }

    /// Serve on `port` until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run(self, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", addr);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for AuthServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServer").field("state", &self.state).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
