//! OAuth 2.0 authorization code issuance.
//!
//! The authorization request is validated, the client resolved, a one-time
//! code minted and bound to the flow, and the user's decision turned into a
//! redirect to the client's registered URI.
//!
//! ## Supported Standards
//! - RFC 6749 §4.1: Authorization Code Grant, up to the authorization response

pub mod consent;
pub mod directory;
pub mod handlers;
pub mod issuer;
pub mod pending;
pub mod random;
pub mod validator;

pub use consent::{ConsentRenderer, ConsentView, HtmlConsentRenderer};
pub use directory::{ClientDirectory, InMemoryClientDirectory};
pub use issuer::CodeIssuer;
pub use pending::{PendingAuthorization, PendingStore};
pub use random::{OsRandomSource, SecureRandomSource};
