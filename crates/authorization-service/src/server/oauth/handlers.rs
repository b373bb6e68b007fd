//! Authorization endpoint handlers.
//!
//! ```text
//! GET /auth?response_type=code&client_id=...&redirect_uri=...&scope=...&state=...
//!     ├─► Invalid parameters → 400 invalid_request
//!     ├─► Unknown client     → 400 invalid_client
//!     ├─► No randomness      → 500 server_error
//!     ├─► Pending store full → 500 server_error
//!     └─► Issue code, set signed cookie, render consent page
//!
//! GET /confirm_auth?authorize=...&state=...&client_id=... (with cookie)
//!     ├─► No cookie / bad payload / used or expired code → 400 invalid_request
//!     ├─► Unknown or deleted client → 400 invalid_client
//!     ├─► Binding mismatch → 400 invalid_request
//!     ├─► authorize=false or absent → 302 {redirect_uri}?error=access_denied&state=...
//!     └─► authorize=true  → 302 {redirect_uri}?code=...&state=...
//! ```

use std::time::Duration;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use cookie::{Cookie, SameSite};
use url::Url;

use super::consent::ConsentView;
use super::validator;
use crate::config::auth::COOKIE_NAME;
use crate::error::{AuthError, AuthResult};
use crate::models::{AuthorizeQuery, ConfirmDecision, ConfirmQuery};
use crate::server::transport::AppState;

// ─── Authorization Endpoint ──────────────────────────────────────────────────

/// `GET /auth`
///
/// Validate the request, resolve the client, issue a code bound to this flow
/// and render the consent page. The code only leaves the server inside the
/// signed cookie; it is never rendered or logged.
pub async fn handle_authorize(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    query: Result<Query<AuthorizeQuery>, QueryRejection>,
) -> AuthResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| AuthError::invalid_request(e.body_text()))?;
    let request = validator::validate_authorize(query)?;

    let client = state.directory.lookup(&request.client_id).await?;
    let code = state.issuer.issue()?;
    let pending = state.pending.begin(code, &request, &client).await?;

    tracing::info!(
        client = %client.name,
        scopes = ?request.scopes,
        "Issued pending authorization"
    );

    let cookie = code_cookie(pending.code, state.pending.lifetime(), state.secure_cookies);
    let html = state.renderer.render(&ConsentView {
        logo: client.logo,
        name: client.name,
        website: client.website,
        state: request.state,
        scopes: request.scopes,
    });

    Ok((jar.add(cookie), [(header::CACHE_CONTROL, "no-store")], Html(html)))
}

// ─── Confirmation Endpoint ───────────────────────────────────────────────────

/// `GET /confirm_auth`
///
/// Consume the pending authorization named by the cookie and redirect to the
/// client's registered URI with the code or a denial. Once the pending entry
/// has been looked up the cookie is cleared, whatever the outcome.
pub async fn handle_confirm(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    query: Result<Query<ConfirmQuery>, QueryRejection>,
) -> Response {
    let Some(code) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()) else {
        return AuthError::invalid_request("Missing pending authorization cookie").into_response();
    };

    let decision = match query
        .map_err(|e| AuthError::invalid_request(e.body_text()))
        .and_then(|Query(q)| validator::parse_decision(q))
    {
        Ok(decision) => decision,
        Err(e) => return e.into_response(),
    };

    let jar = jar.remove(Cookie::build(COOKIE_NAME).path("/"));

    match complete_confirmation(&state, &code, decision).await {
        Ok(location) => (StatusCode::FOUND, jar, [(header::LOCATION, location)]).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

async fn complete_confirmation(
    state: &AppState,
    code: &str,
    decision: ConfirmDecision,
) -> AuthResult<String> {
    let pending = state
        .pending
        .consume(code)
        .await
        .ok_or_else(|| AuthError::invalid_request("Unknown, used or expired authorization code"))?;

    // The client may have been deleted (or its name reassigned) since /auth.
    let client = state.directory.lookup(&decision.client_id).await?;

    if !pending.belongs_to(&decision.client_id) {
        return Err(AuthError::invalid_request("client_id does not match pending authorization"));
    }
    if pending.state != decision.state {
        return Err(AuthError::invalid_request("state does not match pending authorization"));
    }
    if client.id != pending.client_id {
        return Err(AuthError::invalid_client("Client changed during authorization"));
    }

    if decision.authorize {
        tracing::info!(client = %client.name, "Authorization approved");
        redirect_location(&client.redirect_uri, &[
            ("code", pending.code.as_str()),
            ("state", decision.state.as_str()),
        ])
    } else {
        tracing::info!(client = %client.name, "Authorization denied");
        redirect_location(&client.redirect_uri, &[
            ("error", "access_denied"),
            ("state", decision.state.as_str()),
        ])
    }
}

/// Append percent-encoded query pairs to the registered redirect URI.
fn redirect_location(redirect_uri: &str, params: &[(&str, &str)]) -> AuthResult<String> {
    let mut url = Url::parse(redirect_uri)
        .map_err(|e| AuthError::server(format!("Registered redirect_uri is invalid: {e}")))?;
    url.query_pairs_mut().extend_pairs(params);
    Ok(url.into())
}

/// Build the cookie carrying the pending code.
fn code_cookie(code: String, lifetime: Duration, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::try_from(lifetime).unwrap_or(time::Duration::MINUTE);

    Cookie::build((COOKIE_NAME, code))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_location_plain() {
        let location = redirect_location("https://localhost:8080/callback", &[
            ("code", "abc-_123"),
            ("state", "xyz"),
        ])
        .unwrap();
        assert_eq!(location, "https://localhost:8080/callback?code=abc-_123&state=xyz");
    }

    #[test]
    fn test_redirect_location_keeps_existing_query() {
        let location =
            redirect_location("https://app.example/cb?tenant=1", &[("error", "access_denied")])
                .unwrap();
        assert_eq!(location, "https://app.example/cb?tenant=1&error=access_denied");
    }

    #[test]
    fn test_redirect_location_encodes_state() {
        let location =
            redirect_location("https://app.example/cb", &[("state", "a b&c=d")]).unwrap();
        assert_eq!(location, "https://app.example/cb?state=a+b%26c%3Dd");
    }

    #[test]
    fn test_redirect_location_invalid_uri() {
        let err = redirect_location("not a uri", &[("state", "x")]).unwrap_err();
        assert_eq!(err.code(), "server_error");
    }

    #[test]
    fn test_code_cookie_attributes() {
        let cookie = code_cookie("c0de".into(), Duration::from_secs(60), true);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "c0de");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
    }
}
