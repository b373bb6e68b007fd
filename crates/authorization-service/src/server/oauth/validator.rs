//! Authorization request validation.
//!
//! Rules are applied in a fixed order and the first failure wins. Every
//! failure is reported as `invalid_request`; nothing is aggregated.

use crate::error::{AuthError, AuthResult};
use crate::models::{AuthorizationRequest, AuthorizeQuery, ConfirmDecision, ConfirmQuery};

/// The only supported response type.
const RESPONSE_TYPE_CODE: &str = "code";

/// Validate the query of `GET /auth`.
///
/// Order: `response_type`, `client_id`, `redirect_uri`, `scope`, `state`.
/// The redirect URI check is a sanity gate only (it must mention `https`);
/// redirects always go to the client's registered URI.
pub fn validate_authorize(query: AuthorizeQuery) -> AuthResult<AuthorizationRequest> {
    if query.response_type.as_deref() != Some(RESPONSE_TYPE_CODE) {
        return Err(AuthError::invalid_request("response_type must be 'code'"));
    }

    let client_id = required(query.client_id, "client_id")?;

    let redirect_uri = query.redirect_uri.unwrap_or_default();
    if !redirect_uri.contains("https") {
        return Err(AuthError::invalid_request("redirect_uri must use https"));
    }

    let scope = query.scope.unwrap_or_default();
    let scopes: Vec<String> = scope.split_whitespace().map(str::to_owned).collect();
    if scopes.is_empty() {
        return Err(AuthError::invalid_request("Missing scope"));
    }

    let state = required(query.state, "state")?;

    Ok(AuthorizationRequest { client_id, redirect_uri, scopes, state })
}

/// Parse the decision payload of `GET /confirm_auth`.
///
/// A missing `authorize` is a denial; a value that is not a boolean is
/// `invalid_request`. An empty `client_id` is passed through and fails the
/// client lookup later.
pub fn parse_decision(query: ConfirmQuery) -> AuthResult<ConfirmDecision> {
    let authorize = match query.authorize.as_deref() {
        None => false,
        Some(raw) => parse_bool(raw)
            .ok_or_else(|| AuthError::invalid_request("authorize must be a boolean"))?,
    };
    let state = required(query.state, "state")?;
    let client_id = query.client_id.unwrap_or_default();

    Ok(ConfirmDecision { authorize, state, client_id })
}

fn required(value: Option<String>, field: &str) -> AuthResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AuthError::invalid_request(format!("Missing {field}"))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_query() -> AuthorizeQuery {
        AuthorizeQuery {
            response_type: Some("code".into()),
            client_id: Some("fibers".into()),
            redirect_uri: Some("https://x".into()),
            scope: Some("read write".into()),
            state: Some("xyz".into()),
        }
    }

    fn assert_invalid(query: AuthorizeQuery) {
        let err = validate_authorize(query).unwrap_err();
        assert_eq!(err.code(), "invalid_request");
    }

    #[test]
    fn test_valid_request() {
        let req = validate_authorize(valid_query()).unwrap();
        assert_eq!(req.client_id, "fibers");
        assert_eq!(req.scopes, vec!["read", "write"]);
        assert_eq!(req.state, "xyz");
    }

    #[test]
    fn test_response_type_must_be_code() {
        assert_invalid(AuthorizeQuery { response_type: Some("token".into()), ..valid_query() });
        assert_invalid(AuthorizeQuery { response_type: Some("CODE".into()), ..valid_query() });
        assert_invalid(AuthorizeQuery { response_type: None, ..valid_query() });
    }

    #[test]
    fn test_missing_client_id() {
        assert_invalid(AuthorizeQuery { client_id: None, ..valid_query() });
        assert_invalid(AuthorizeQuery { client_id: Some(String::new()), ..valid_query() });
    }

    #[test]
    fn test_redirect_uri_needs_https() {
        assert_invalid(AuthorizeQuery { redirect_uri: Some("http://x".into()), ..valid_query() });
        assert_invalid(AuthorizeQuery { redirect_uri: None, ..valid_query() });
    }

    #[test]
    fn test_redirect_uri_is_substring_check() {
        let query = AuthorizeQuery { redirect_uri: Some("app://https-bridge".into()), ..valid_query() };
        assert!(validate_authorize(query).is_ok());
    }

    #[test]
    fn test_blank_scope_rejected() {
        assert_invalid(AuthorizeQuery { scope: Some(String::new()), ..valid_query() });
        assert_invalid(AuthorizeQuery { scope: Some("   ".into()), ..valid_query() });
    }

    #[test]
    fn test_missing_state() {
        assert_invalid(AuthorizeQuery { state: None, ..valid_query() });
    }

    #[test]
    fn test_first_failure_wins() {
        let query = AuthorizeQuery {
            response_type: Some("code".into()),
            client_id: None,
            redirect_uri: None,
            scope: None,
            state: None,
        };
        let err = validate_authorize(query).unwrap_err();
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_scope_order_preserved() {
        let query = AuthorizeQuery { scope: Some("write  read\tprofile".into()), ..valid_query() };
        let req = validate_authorize(query).unwrap();
        assert_eq!(req.scopes, vec!["write", "read", "profile"]);
    }

    #[test]
    fn test_parse_decision() {
        let decision = parse_decision(ConfirmQuery {
            authorize: Some("true".into()),
            state: Some("xyz".into()),
            client_id: Some("fibers".into()),
        })
        .unwrap();
        assert!(decision.authorize);

        let decision = parse_decision(ConfirmQuery {
            authorize: Some("0".into()),
            state: Some("xyz".into()),
            client_id: Some("fibers".into()),
        })
        .unwrap();
        assert!(!decision.authorize);
    }

    #[test]
    fn test_parse_decision_rejects_bad_payload() {
        let base = ConfirmQuery {
            authorize: Some("true".into()),
            state: Some("xyz".into()),
            client_id: Some("fibers".into()),
        };
        assert!(parse_decision(ConfirmQuery { authorize: Some("maybe".into()), ..base.clone() }).is_err());
        assert!(parse_decision(ConfirmQuery { authorize: Some(String::new()), ..base.clone() }).is_err());
        assert!(parse_decision(ConfirmQuery { state: None, ..base }).is_err());
    }

    #[test]
    fn test_parse_decision_missing_authorize_is_denial() {
        let decision = parse_decision(ConfirmQuery {
            authorize: None,
            state: Some("xyz".into()),
            client_id: Some("fibers".into()),
        })
        .unwrap();
        assert!(!decision.authorize);
    }

    #[test]
    fn test_parse_decision_keeps_empty_client_id() {
        let decision = parse_decision(ConfirmQuery {
            authorize: Some("true".into()),
            state: Some("xyz".into()),
            client_id: None,
        })
        .unwrap();
        assert_eq!(decision.client_id, "");
    }
}
