//! Property-based tests for authorization request validation and code shape.

use std::sync::Arc;

use proptest::prelude::*;

use authorization_service::models::{AuthorizeQuery, ConfirmQuery};
use authorization_service::server::oauth::validator::{parse_decision, validate_authorize};
use authorization_service::server::oauth::{CodeIssuer, OsRandomSource};

/// Generate a query that passes every rule.
fn arb_valid_query() -> impl Strategy<Value = AuthorizeQuery> {
    (
        "[a-z0-9_-]{1,20}",                             // client_id
        "[a-z./:]{0,10}",                               // redirect_uri suffix
        proptest::collection::vec("[a-z:.]{1,10}", 1..5), // scopes
        "[A-Za-z0-9]{1,32}",                            // state
    )
        .prop_map(|(client_id, suffix, scopes, state)| AuthorizeQuery {
            response_type: Some("code".into()),
            client_id: Some(client_id),
            redirect_uri: Some(format!("https://{suffix}")),
            scope: Some(scopes.join(" ")),
            state: Some(state),
        })
}

proptest! {
    /// Valid queries are accepted and keep scope order.
    #[test]
    fn valid_query_accepted(query in arb_valid_query()) {
        let scope = query.scope.clone().unwrap();
        let request = validate_authorize(query).expect("valid");
        let expected: Vec<&str> = scope.split(' ').collect();
        prop_assert_eq!(request.scopes, expected);
    }

    /// Any response_type other than "code" is invalid_request.
    #[test]
    fn wrong_response_type_rejected(
        query in arb_valid_query(),
        response_type in "[a-zA-Z_]{0,10}".prop_filter("not code", |s| s != "code"),
    ) {
        let query = AuthorizeQuery { response_type: Some(response_type), ..query };
        let err = validate_authorize(query).unwrap_err();
        prop_assert_eq!(err.code(), "invalid_request");
    }

    /// A redirect_uri never mentioning https is invalid_request.
    #[test]
    fn redirect_without_https_rejected(
        query in arb_valid_query(),
        redirect_uri in "[a-z:/.]{0,30}".prop_filter("no https", |s| !s.contains("https")),
    ) {
        let query = AuthorizeQuery { redirect_uri: Some(redirect_uri), ..query };
        let err = validate_authorize(query).unwrap_err();
        prop_assert_eq!(err.code(), "invalid_request");
    }

    /// Dropping any single required field fails with invalid_request.
    #[test]
    fn missing_field_rejected(query in arb_valid_query(), field in 0usize..5) {
        let mut query = query;
        match field {
            0 => query.response_type = None,
            1 => query.client_id = None,
            2 => query.redirect_uri = None,
            3 => query.scope = None,
            _ => query.state = None,
        }
        let err = validate_authorize(query).unwrap_err();
        prop_assert_eq!(err.code(), "invalid_request");
    }

    /// Decisions parse for any state and client identifier.
    #[test]
    fn decision_parses(
        authorize in any::<bool>(),
        state in "[A-Za-z0-9]{1,32}",
        client_id in "[a-z0-9]{1,20}",
    ) {
        let decision = parse_decision(ConfirmQuery {
            authorize: Some(authorize.to_string()),
            state: Some(state.clone()),
            client_id: Some(client_id.clone()),
        })
        .expect("valid decision");

        prop_assert_eq!(decision.authorize, authorize);
        prop_assert_eq!(decision.state, state);
        prop_assert_eq!(decision.client_id, client_id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Issued codes are always 43 URL-safe characters.
    #[test]
    fn issued_code_is_url_safe(_round in 0u8..255) {
        let code = CodeIssuer::new(Arc::new(OsRandomSource)).issue().expect("entropy");
        prop_assert_eq!(code.len(), 43);
        prop_assert!(code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }
}
