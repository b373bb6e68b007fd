//! Authorization Service
//!
//! A small OAuth 2.0 authorization server that issues short-lived authorization
//! codes. A registered client sends the user to `/auth`, the user approves or
//! denies on a consent page, and `/confirm_auth` redirects back to the client's
//! registered redirect URI with either a code or `error=access_denied`.
//!
//! # Features
//!
//! - **Single-use codes**: every code is bound to one pending flow and consumed once
//! - **Short-lived**: pending flows expire after one minute
//! - **Signed carrier**: the code travels in a signed, HTTP-only cookie
//! - **Pluggable collaborators**: client directory, random source and consent
//!   renderer are injected at construction
//!
//! # Example
//!
//! ```no_run
//! use authorization_service::{config::Config, server::AuthServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = AuthServer::from_config(&config).await?;
//!     server.run(config.port).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod server;

pub use config::Config;
pub use error::{AuthError, DirectoryError};
pub use models::Client;
