// simplelogin-api/tests/api.rs
use serde_json::json;
use simplelogin_api::{
    with_deadline, CreateCustomAliasRequest, Error, RandomMode, ReqwestClient, SimpleLoginClient,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests that do not carry the given header
struct HeaderMissing(&'static str);

impl Match for HeaderMissing {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key(self.0)
    }
}

fn client(server: &MockServer, key: &str) -> SimpleLoginClient<ReqwestClient> {
    let http = ReqwestClient::new(Some(Duration::from_secs(5))).unwrap();
    SimpleLoginClient::new(http, &server.uri(), key)
}

#[tokio::test]
async fn test_user_info_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_info"))
        .and(header("Authentication", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "John",
            "email": "john@example.com",
            "is_premium": true,
            "in_trial": false,
            "max_alias_free_plan": 5,
            "profile_picture_url": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client(&server, "k").user_info().await.unwrap();
    assert_eq!(info.email, "john@example.com");
    assert_eq!(info.name, "John");
    assert!(info.is_premium);
}

#[tokio::test]
async fn test_no_auth_header_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_info"))
        .and(HeaderMissing("Authentication"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "", "email": ""})),
        )
        .expect(1)
        .mount(&server)
        .await;

    client(&server, "").user_info().await.unwrap();
}

#[tokio::test]
async fn test_alias_options_with_hostname() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v5/alias/options"))
        .and(query_param("hostname", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "can_create": true,
            "prefix_suggestion": "ex",
            "suffixes": [
                {"suffix": ".a@b", "signed_suffix": ".a@b.sig", "is_custom": false, "is_premium": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = client(&server, "k")
        .alias_options(Some("example.com"))
        .await
        .unwrap();
    assert!(options.can_create);
    assert_eq!(options.prefix_suggestion, "ex");
    assert_eq!(options.suffixes.len(), 1);
    assert_eq!(options.suffixes[0].signed_suffix, ".a@b.sig");
}

#[tokio::test]
async fn test_random_alias_without_hostname() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/alias/random/new"))
        .and(query_param_is_missing("hostname"))
        .and(query_param("mode", "uuid"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"note": "for newsletters"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "email": "rand@sl"})))
        .expect(1)
        .mount(&server)
        .await;

    let alias = client(&server, "k")
        .create_random_alias(Some(""), Some(RandomMode::Uuid), Some("for newsletters"))
        .await
        .unwrap();
    assert_eq!(alias.email, "rand@sl");
}

#[tokio::test]
async fn test_custom_alias_body_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/alias/custom/new"))
        .and(body_json(json!({
            "alias_prefix": "p",
            "signed_suffix": ".x@y.sig",
            "mailbox_ids": [1, 2],
            "note": "Note",
            "name": "Name"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "email": "p.x@y"})))
        .expect(1)
        .mount(&server)
        .await;

    let body = CreateCustomAliasRequest {
        alias_prefix: "p".to_string(),
        signed_suffix: ".x@y.sig".to_string(),
        mailbox_ids: vec![1, 2],
        note: Some("Note".to_string()),
        name: Some("Name".to_string()),
    };
    let alias = client(&server, "k")
        .create_custom_alias(None, &body)
        .await
        .unwrap();
    assert_eq!(alias.email, "p.x@y");
}

#[tokio::test]
async fn test_list_aliases_with_hostname_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/aliases"))
        .and(query_param("page_id", "2"))
        .and(query_param("hostname", "ex.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"aliases": [{"id": 10, "email": "a@b"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let aliases = client(&server, "k")
        .list_aliases(2, Some("ex.com"))
        .await
        .unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0].id, 10);
}

#[tokio::test]
async fn test_delete_alias_with_hostname() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/aliases/99"))
        .and(query_param("hostname", "ex.com"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, "k")
        .delete_alias(99, Some("ex.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_by_email_found_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/aliases"))
        .and(query_param("page_id", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"aliases": [{"id": 5, "email": "t@sl"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/aliases/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client(&server, "k")
        .delete_alias_by_email("t@sl", None)
        .await
        .unwrap();
    assert_eq!(deleted, Some(5));
}

#[tokio::test]
async fn test_delete_by_email_not_found_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/aliases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aliases": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let deleted = client(&server, "k")
        .delete_alias_by_email("notfound@sl", None)
        .await
        .unwrap();
    assert_eq!(deleted, None);
}

#[tokio::test]
async fn test_default_mailbox_id_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/mailboxes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mailboxes": [
            {"id": 3, "email": "a@x", "default": false, "verified": true},
            {"id": 1, "email": "b@x", "default": true, "verified": true}
        ]})))
        .mount(&server)
        .await;

    assert_eq!(client(&server, "k").default_mailbox_id().await.unwrap(), 1);
}

#[tokio::test]
async fn test_error_body_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad input"})))
        .mount(&server)
        .await;

    let err = client(&server, "k").user_info().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "HTTP 400: bad input");
}

#[tokio::test]
async fn test_deadline_cancels_slow_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "x", "email": "x"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let c = client(&server, "k");
    let err = with_deadline(Duration::from_millis(100), c.user_info())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DeadlineExceeded(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let http = ReqwestClient::new(Some(Duration::from_secs(2))).unwrap();
    let c = SimpleLoginClient::new(http, "http://127.0.0.1:1", "k");
    let err = c.user_info().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
