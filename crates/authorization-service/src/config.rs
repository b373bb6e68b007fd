//! Configuration for the authorization service.

use std::path::PathBuf;
use std::time::Duration;

/// Authorization flow constants.
pub mod auth {
    use std::time::Duration;

    /// Name of the cookie carrying the pending authorization code.
    pub const COOKIE_NAME: &str = "temp_auth_request_code";

    /// Lifetime of an issued code and its cookie (1 minute).
    pub const CODE_LIFETIME: Duration = Duration::from_secs(60);

    /// Random bytes drawn per code (256 bits).
    pub const CODE_BYTES: usize = 32;

    /// Maximum number of flows awaiting confirmation at once.
    pub const PENDING_CAPACITY: u64 = 10_000;

    /// Minimum length of a configured cookie signing secret.
    pub const MIN_SECRET_LEN: usize = 64;
}

/// HTTP server defaults.
pub mod http {
    /// Default listening port.
    pub const DEFAULT_PORT: u16 = 3000;
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,

    /// Lifetime of issued codes.
    pub code_lifetime: Duration,

    /// Whether the code cookie carries the `Secure` attribute.
    pub secure_cookies: bool,

    /// Secret used to sign the code cookie. A random key is used when absent.
    pub cookie_secret: Option<String>,

    /// JSON file with registered clients. The demo client is seeded when absent.
    pub clients_file: Option<PathBuf>,

    /// Maximum number of pending authorizations held at once.
    pub pending_capacity: u64,
}

impl Config {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            port: http::DEFAULT_PORT,
            code_lifetime: auth::CODE_LIFETIME,
            secure_cookies: true,
            cookie_secret: None,
            clients_file: None,
            pending_capacity: auth::PENDING_CAPACITY,
        }
    }

    /// Create a test configuration.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            code_lifetime: auth::CODE_LIFETIME,
            secure_cookies: true,
            cookie_secret: Some("test-cookie-secret-".repeat(4)),
            clients_file: None,
            pending_capacity: 100,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PORT`, `COOKIE_SECRET`, `CLIENTS_FILE` and `INSECURE_COOKIES`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number: {e}"))?;
        }
        config.cookie_secret = std::env::var("COOKIE_SECRET").ok();
        config.clients_file = std::env::var("CLIENTS_FILE").ok().map(PathBuf::from);
        if let Ok(value) = std::env::var("INSECURE_COOKIES") {
            config.secure_cookies = !matches!(value.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise fail at first use.
    ///
    /// # Errors
    ///
    /// Returns error if the cookie secret is too short.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(secret) = &self.cookie_secret {
            if secret.len() < auth::MIN_SECRET_LEN {
                anyhow::bail!(
                    "COOKIE_SECRET must be at least {} bytes, got {}",
                    auth::MIN_SECRET_LEN,
                    secret.len()
                );
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("code_lifetime", &self.code_lifetime)
            .field("secure_cookies", &self.secure_cookies)
            .field("cookie_secret", &self.cookie_secret.as_ref().map(|_| "<redacted>"))
            .field("clients_file", &self.clients_file)
            .field("pending_capacity", &self.pending_capacity)
            .finish()
    }
}
