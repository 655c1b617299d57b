use picker_directory::{
    DirectoryError, EntityDirectory, HttpDirectory, HttpDirectoryConfig, SearchQuery,
};
use picker_types::EntityId;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpDirectory {
    HttpDirectory::new(HttpDirectoryConfig {
        base_url: format!("{}/api", server.uri()),
        ..Default::default()
    })
    .unwrap()
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn config_default() {
    let cfg = HttpDirectoryConfig::default();
    assert_eq!(cfg.users_path, "auth/users");
    assert_eq!(cfg.timeout_secs, 30);
    assert!(cfg.auth_token.is_none());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: HttpDirectoryConfig =
        serde_json::from_str(r#"{"base_url": "https://dir.example/api"}"#).unwrap();
    assert_eq!(cfg.base_url, "https://dir.example/api");
    assert_eq!(cfg.users_path, "auth/users");
}

#[test]
fn empty_base_url_is_rejected() {
    let err = HttpDirectory::new(HttpDirectoryConfig {
        base_url: " ".into(),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, DirectoryError::Config(_)));
}

// ── Batch lookup ────────────────────────────────────────────────

#[tokio::test]
async fn lookup_by_ids_sends_json_uids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .and(query_param("uids", r#"["u1","u2"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"uid": "u1", "first_name": "Ann"},
            {"uid": "u2", "first_name": "Bob"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = client_for(&server);
    let found = dir
        .lookup_by_ids(&[EntityId::from("u1"), EntityId::from("u2")])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].get_str("/first_name"), Some("Bob"));
}

#[tokio::test]
async fn lookup_by_ids_empty_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = client_for(&server);
    assert!(dir.lookup_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn lookup_by_ids_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .lookup_by_ids(&[EntityId::from("u1")])
        .await
        .unwrap_err();
    match err {
        DirectoryError::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn lookup_by_ids_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .lookup_by_ids(&[EntityId::from("u1")])
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidResponse(_)));
}

// ── Single lookup ───────────────────────────────────────────────

#[tokio::test]
async fn lookup_by_id_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/u2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"uid": "u2", "first_name": "Bob"})),
        )
        .mount(&server)
        .await;

    let bob = client_for(&server)
        .lookup_by_id(&EntityId::from("u2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.get_str("/first_name"), Some("Bob"));
}

#[tokio::test]
async fn lookup_by_id_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup_by_id(&EntityId::from("ghost"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_by_id_mismatched_record_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "u3"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .lookup_by_id(&EntityId::from("u2"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidResponse(_)));
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/u1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "u1"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = HttpDirectory::new(HttpDirectoryConfig {
        base_url: format!("{}/api/", server.uri()),
        auth_token: Some("secret".into()),
        ..Default::default()
    })
    .unwrap();
    assert!(dir.lookup_by_id(&EntityId::from("u1")).await.unwrap().is_some());
}

// ── Search ──────────────────────────────────────────────────────

#[tokio::test]
async fn search_sends_query_exclusion_and_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/search"))
        .and(query_param("q", "Bob"))
        .and(query_param("exclude", r#"["u1"]"#))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "u2", "text": "Bob X"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery::new("Bob")
        .excluding([EntityId::from("u1")])
        .page(10, 500);
    let hits = client_for(&server).search(&query).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_str(), "u2");
    assert_eq!(hits[0].display_text, "Bob X");
}

#[tokio::test]
async fn search_drops_excluded_ids_returned_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "u1", "text": "Ann"}, {"id": "u2", "text": "Bob"}]
        })))
        .mount(&server)
        .await;

    let query = SearchQuery::new("").excluding([EntityId::from("u1")]);
    let hits = client_for(&server).search(&query).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_str(), "u2");
}

#[tokio::test]
async fn network_error_when_server_is_gone() {
    let server = MockServer::start().await;
    let dir = client_for(&server);
    drop(server);

    let err = dir.lookup_by_id(&EntityId::from("u1")).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Network(_)));
}
