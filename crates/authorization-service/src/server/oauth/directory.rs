//! Registered client lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::DirectoryError;
use crate::models::Client;

/// Lookup of registered clients by public identifier.
///
/// Read-only from the authorization flow's point of view; implementations
/// must be safe to query concurrently.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Resolve an active client, or fail with [`DirectoryError::NotFound`].
    async fn lookup(&self, identifier: &str) -> Result<Client, DirectoryError>;
}

/// In-memory client registry keyed by client id.
#[derive(Clone, Default)]
pub struct InMemoryClientDirectory {
    clients: Arc<RwLock<HashMap<String, Client>>>,
}

impl InMemoryClientDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding only the demo client.
    #[must_use]
    pub fn with_demo_client() -> Self {
        let demo = Client::demo();
        Self { clients: Arc::new(RwLock::new(HashMap::from([(demo.id.clone(), demo)]))) }
    }

    /// Load clients from a JSON array file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let clients: Vec<Client> = serde_json::from_str(&raw)?;

        let directory = Self::new();
        for client in clients {
            directory.upsert(client).await?;
        }

        tracing::info!(
            path = %path.as_ref().display(),
            count = directory.len().await,
            "Loaded client registry"
        );
        Ok(directory)
    }

    /// Insert a client, or update name, website, logo and redirect URI of an
    /// existing one with the same id.
    pub async fn upsert(&self, client: Client) -> Result<(), DirectoryError> {
        let mut clients = self.clients.write().await;

        if clients.values().any(|c| c.name == client.name && c.id != client.id) {
            return Err(DirectoryError::Conflict { name: client.name });
        }

        match clients.get_mut(&client.id) {
            Some(existing) => {
                existing.name = client.name;
                existing.website = client.website;
                existing.logo = client.logo;
                existing.redirect_uri = client.redirect_uri;
                existing.updated_at = Utc::now();
            }
            None => {
                clients.insert(client.id.clone(), client);
            }
        }
        Ok(())
    }

    /// Mark a client deleted. Returns false if no active client has this id.
    pub async fn soft_delete(&self, id: &str) -> bool {
        let mut clients = self.clients.write().await;
        match clients.get_mut(id) {
            Some(client) if !client.is_deleted() => {
                client.deleted_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Number of active clients.
    pub async fn len(&self) -> usize {
        self.clients.read().await.values().filter(|c| !c.is_deleted()).count()
    }

    /// Whether the directory has no active client.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    /// Matches the client name first, then the stable id.
    async fn lookup(&self, identifier: &str) -> Result<Client, DirectoryError> {
        let clients = self.clients.read().await;
        let active = || clients.values().filter(|c| !c.is_deleted());

        active()
            .find(|c| c.name == identifier)
            .or_else(|| active().find(|c| c.id == identifier))
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(identifier))
    }
}

impl std::fmt::Debug for InMemoryClientDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryClientDirectory").finish()
    }
}
