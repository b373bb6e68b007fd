//! Data models for the authorization flow.

pub mod client;
pub mod request;

pub use client::Client;
pub use request::{AuthorizationRequest, AuthorizeQuery, ConfirmDecision, ConfirmQuery};
