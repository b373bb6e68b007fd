//! Pending authorizations awaiting the user's decision.
//!
//! A pending authorization binds an issued code to the request that produced
//! it. The code itself travels to the browser in the signed cookie; this
//! store is the server-side half, keyed by code. Entries are removed on first
//! consumption and expire passively after the code lifetime.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::error::{AuthError, AuthResult};
use crate::models::{AuthorizationRequest, Client};

/// The binding between an issued code and its originating request.
#[derive(Clone)]
pub struct PendingAuthorization {
    pub code: String,
    /// Stable id of the owning client.
    pub client_id: String,
    /// Identifier the request used to name the client.
    pub client_identifier: String,
    /// The client's original `state` value.
    pub state: String,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingAuthorization {
    /// Check if the binding has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the binding has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether `identifier` names the client this flow was started for.
    #[must_use]
    pub fn belongs_to(&self, identifier: &str) -> bool {
        identifier == self.client_identifier || identifier == self.client_id
    }
}

impl std::fmt::Debug for PendingAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAuthorization")
            .field("client_id", &self.client_id)
            .field("client_identifier", &self.client_identifier)
            .field("state", &self.state)
            .field("scopes", &self.scopes)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Server-side store of pending authorizations.
#[derive(Clone)]
pub struct PendingStore {
    pending: Cache<String, PendingAuthorization>,
    lifetime: Duration,
    capacity: u64,
}

impl PendingStore {
    /// Create a store whose entries live for `lifetime`, holding at most
    /// `capacity` flows.
    #[must_use]
    pub fn new(lifetime: Duration, capacity: u64) -> Self {
        let pending = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(lifetime)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { pending, lifetime, capacity }
    }

    /// Lifetime of each pending authorization.
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Bind a freshly issued code to a validated request and store it.
    ///
    /// Fails with `server_error` when the store is full, so a caller never
    /// hands out a code the store did not keep.
    pub async fn begin(
        &self,
        code: String,
        request: &AuthorizationRequest,
        client: &Client,
    ) -> AuthResult<PendingAuthorization> {
        if self.len().await >= self.capacity {
            tracing::warn!(capacity = self.capacity, "Pending authorization store is full");
            return Err(AuthError::server("Too many pending authorizations"));
        }

        let created_at = Utc::now();
        let expires_at = created_at
            + chrono::Duration::from_std(self.lifetime).unwrap_or_else(|_| chrono::Duration::zero());

        let pending = PendingAuthorization {
            code,
            client_id: client.id.clone(),
            client_identifier: request.client_id.clone(),
            state: request.state.clone(),
            scopes: request.scopes.clone(),
            created_at,
            expires_at,
        };

        self.pending.insert(pending.code.clone(), pending.clone()).await;

        // Concurrent inserts can still overshoot the capacity check above.
        self.pending.run_pending_tasks().await;
        if !self.pending.contains_key(&pending.code) {
            tracing::warn!(capacity = self.capacity, "Pending authorization was not retained");
            return Err(AuthError::server("Too many pending authorizations"));
        }

        Ok(pending)
    }

    /// Consume a pending authorization (one-time use).
    ///
    /// Returns the binding if it exists and has not expired. The entry is
    /// removed either way, so a second call for the same code returns `None`.
    pub async fn consume(&self, code: &str) -> Option<PendingAuthorization> {
        let pending = self.pending.remove(code).await?;

        if pending.is_expired() {
            tracing::debug!(client_id = %pending.client_id, "Pending authorization expired");
            return None;
        }

        Some(pending)
    }

    /// Approximate number of pending flows.
    pub async fn len(&self) -> u64 {
        self.pending.run_pending_tasks().await;
        self.pending.entry_count()
    }

    /// Whether no flow is pending.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl std::fmt::Debug for PendingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStore")
            .field("lifetime", &self.lifetime)
            .field("capacity", &self.capacity)
            .finish()
    }
}
