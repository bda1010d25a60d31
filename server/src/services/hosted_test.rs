use super::*;

fn session_json(user_id: &str) -> String {
    serde_json::json!({
        "access_token": "at-123",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1_900_000_000,
        "refresh_token": "rt-456",
        "user": { "id": user_id, "email": "user@example.com", "aud": "authenticated" }
    })
    .to_string()
}

#[test]
fn endpoint_url_joins_without_double_slash() {
    assert_eq!(endpoint_url("https://auth.test/", "signup"), "https://auth.test/auth/v1/signup");
    assert_eq!(
        endpoint_url("https://auth.test", "token?grant_type=password"),
        "https://auth.test/auth/v1/token?grant_type=password"
    );
}

#[test]
fn parse_session_reads_tokens_and_user() {
    let session = parse_session(&session_json("u1")).unwrap();
    assert_eq!(session.access_token, "at-123");
    assert_eq!(session.refresh_token, "rt-456");
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(session.user, ProviderUser { id: "u1".into(), email: "user@example.com".into() });
}

#[test]
fn parse_session_rejects_empty_user_id() {
    let err = parse_session(&session_json("")).unwrap_err();
    assert!(matches!(err, IdentityError::Malformed(_)));
}

#[test]
fn parse_session_rejects_garbage() {
    assert!(matches!(parse_session("<html>"), Err(IdentityError::Malformed(_))));
}

#[test]
fn parse_user_tolerates_null_email() {
    let user = parse_user(r#"{"id":"u2","email":null,"phone":"+15550100"}"#).unwrap();
    assert_eq!(user, ProviderUser { id: "u2".into(), email: String::new() });
}

#[test]
fn parse_sign_up_with_session() {
    let result = parse_sign_up(&session_json("u3")).unwrap();
    assert!(matches!(result, SignUpResult::Session(s) if s.user.id == "u3"));
}

#[test]
fn parse_sign_up_bare_user_means_confirmation_pending() {
    let body = r#"{"id":"u4","email":"new@example.com","confirmation_sent_at":"2026-10-16T12:00:00Z"}"#;
    let result = parse_sign_up(body).unwrap();
    assert_eq!(
        result,
        SignUpResult::ConfirmationPending(ProviderUser { id: "u4".into(), email: "new@example.com".into() })
    );
}

#[test]
fn parse_sign_up_nested_user_with_null_session() {
    let body = r#"{"user":{"id":"u5","email":"n@example.com"},"session":null,"access_token":null}"#;
    let result = parse_sign_up(body).unwrap();
    assert!(matches!(result, SignUpResult::ConfirmationPending(u) if u.id == "u5"));
}

#[test]
fn provider_error_message_prefers_description() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(provider_error_message(body).as_deref(), Some("Invalid login credentials"));
}

#[test]
fn provider_error_message_reads_msg_field() {
    let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
    assert_eq!(provider_error_message(body).as_deref(), Some("User already registered"));
}

#[test]
fn provider_error_message_none_for_non_json() {
    assert_eq!(provider_error_message("Bad Gateway"), None);
    assert_eq!(provider_error_message(r#"{"error":""}"#), None);
}

#[test]
fn status_error_maps_client_errors_to_rejected() {
    let err = status_error(400, r#"{"error_description":"Invalid login credentials"}"#);
    assert!(
        matches!(&err, IdentityError::Rejected { status: 400, message } if message == "Invalid login credentials")
    );
    assert_eq!(err.user_message(), "Invalid login credentials");
}

#[test]
fn status_error_without_body_message_uses_status() {
    let err = status_error(429, "");
    assert!(matches!(&err, IdentityError::Rejected { message, .. } if message == "request failed: 429"));
}

#[test]
fn status_error_maps_server_errors_to_unavailable() {
    assert!(matches!(status_error(503, "{}"), IdentityError::Unavailable(_)));
}

#[test]
fn client_builds_from_config() {
    let config = IdentityConfig {
        base_url: "https://auth.example.test".into(),
        api_key: "anon".into(),
        timeouts: crate::config::IdentityTimeouts { request_secs: 5, connect_secs: 1 },
    };
    let client = HostedIdentityClient::new(&config).unwrap();
    assert_eq!(client.endpoint("user"), "https://auth.example.test/auth/v1/user");
}

#[test]
fn user_lookup_ok_returns_user() {
    let user = user_lookup(200, r#"{"id":"u1","email":"user@example.com"}"#).unwrap();
    assert_eq!(user, Some(ProviderUser { id: "u1".into(), email: "user@example.com".into() }));
}

#[test]
fn user_lookup_treats_client_rejections_as_no_session() {
    for status in [400, 401, 403, 404, 422] {
        let body = r#"{"code":404,"error_code":"user_not_found","msg":"User from sub claim in JWT does not exist"}"#;
        assert_eq!(user_lookup(status, body).unwrap(), None, "status {status}");
    }
}

#[test]
fn user_lookup_rate_limit_is_an_error() {
    let err = user_lookup(429, r#"{"msg":"Request rate limit reached"}"#).unwrap_err();
    assert!(matches!(err, IdentityError::Rejected { status: 429, .. }));
}

#[test]
fn user_lookup_server_error_is_unavailable() {
    assert!(matches!(user_lookup(502, ""), Err(IdentityError::Unavailable(_))));
}
