//! Inbound request types for `/auth` and `/confirm_auth`.

use serde::Deserialize;

/// Raw query parameters of `GET /auth`.
///
/// Every field is optional here; presence and shape are checked by the
/// validator so that all failures map to the same error.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthorizeQuery {
    pub response_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
}

/// A validated authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    /// Advisory only. Redirects always target the registered URI.
    pub redirect_uri: String,
    /// Requested scopes in request order.
    pub scopes: Vec<String>,
    pub state: String,
}

/// Raw query parameters of `GET /confirm_auth`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConfirmQuery {
    pub authorize: Option<String>,
    pub state: Option<String>,
    pub client_id: Option<String>,
}

/// The user's decision on the consent page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDecision {
    pub authorize: bool,
    pub state: String,
    pub client_id: String,
}
