//! HTTP transport: shared handler state and the router.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::FromRef,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use super::oauth::{
    ClientDirectory, CodeIssuer, ConsentRenderer, HtmlConsentRenderer, PendingStore,
    SecureRandomSource, handlers,
};
use crate::config::Config;

/// Shared state for HTTP handlers.
///
/// Every collaborator is injected, so tests can substitute in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn ClientDirectory>,
    pub issuer: CodeIssuer,
    pub pending: PendingStore,
    pub renderer: Arc<dyn ConsentRenderer>,
    /// Key signing the code cookie.
    pub cookie_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    /// Build handler state from its collaborators and the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configured cookie secret is not a usable key.
    pub fn new(
        directory: Arc<dyn ClientDirectory>,
        random: Arc<dyn SecureRandomSource>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let cookie_key = match &config.cookie_secret {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|e| anyhow::anyhow!("Invalid cookie secret: {e}"))?,
            None => {
                tracing::warn!("No cookie secret configured, using a random signing key");
                Key::generate()
            }
        };

        Ok(Self {
            directory,
            issuer: CodeIssuer::new(random),
            pending: PendingStore::new(config.code_lifetime, config.pending_capacity),
            renderer: Arc::new(HtmlConsentRenderer),
            cookie_key,
            secure_cookies: config.secure_cookies,
        })
    }

    /// Replace the consent renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ConsentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pending", &self.pending)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/auth", get(handlers::handle_authorize))
        .route("/confirm_auth", get(handlers::handle_confirm))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "authorization-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
