//! Registered client model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered relying party.
///
/// The redirect URI is fixed at registration and is the only address the
/// service ever redirects to for this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Stable unique identifier.
    pub id: String,

    /// Unique human-readable name. Authorization requests refer to the client by it.
    pub name: String,

    /// Client website shown on the consent page.
    #[serde(default)]
    pub website: String,

    /// Logo URL shown on the consent page.
    #[serde(default)]
    pub logo: String,

    /// Registered redirect URI.
    pub redirect_uri: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Set when the client has been soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Create a client with empty website and logo.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            website: String::new(),
            logo: String::new(),
            redirect_uri: redirect_uri.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Set the website URL.
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// Set the logo URL.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = logo.into();
        self
    }

    /// The demo client seeded when no registry file is configured.
    #[must_use]
    pub fn demo() -> Self {
        Self::new("19", "fibers", "https://localhost:8080/callback")
            .with_website("https://gofiber.io")
            .with_logo("https://avatars.githubusercontent.com/u/40920169?s=200&v=4")
    }

    /// Whether this client has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
