//! Integration tests for configuration loading and its effect on the server

use article_api::core::error::ConfigError;
use article_api::prelude::*;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
server:
  bind: "0.0.0.0:9000"
storage:
  backend: in_memory
auth:
  tokens:
    - token: editorToken
      user: editor
      roles: [EDITOR]
  policies:
    create: authenticated
    update: "role:EDITOR"
    delete: "role:ADMIN"
listing:
  default_limit: 2
  max_limit: 3
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG_YAML);
    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.storage.backend, StorageBackend::InMemory);
    assert_eq!(config.auth.tokens.len(), 1);
    assert_eq!(config.auth.tokens[0].roles, vec!["EDITOR".to_string()]);
    assert_eq!(config.auth.policies.delete, "role:ADMIN");
    assert_eq!(config.listing.default_limit, 2);
    assert!(!config.fixtures.enabled);
    assert!(config.check().is_ok());
}

#[test]
fn test_missing_file() {
    let err = AppConfig::from_yaml_file("/nonexistent/article-api.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_parse_error_names_file() {
    let file = write_config("listing:\n  max_limit: lots\n");
    let err = AppConfig::from_yaml_file(file.path()).unwrap_err();

    match err {
        ConfigError::ParseError { file: Some(name), .. } => {
            assert_eq!(name, file.path().display().to_string());
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_overrides_apply_on_top_of_file() {
    let file = write_config(CONFIG_YAML);
    let config = AppConfig::from_yaml_file(file.path())
        .unwrap()
        .with_overrides(|key| match key {
            "ARTICLE_API_BIND" => Some("127.0.0.1:1234".to_string()),
            "ARTICLE_API_SEED" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.server.bind, "127.0.0.1:1234");
    assert!(config.fixtures.enabled);
    assert_eq!(config.fixtures.count, 5);
    assert_eq!(config.listing.max_limit, 3);
}

#[test]
fn test_postgres_without_url_fails_check() {
    let config = AppConfig::default()
        .with_overrides(|key| (key == "ARTICLE_API_STORAGE").then(|| "postgres".to_string()))
        .unwrap();
    assert!(config.check().is_err());

    let config = config
        .with_overrides(|key| {
            (key == "ARTICLE_API_DATABASE_URL").then(|| "postgres://localhost/articles".to_string())
        })
        .unwrap();
    assert!(config.check().is_ok());
}

#[test]
fn test_default_config_passes_check() {
    let config = AppConfig::default().with_overrides(no_env).unwrap();
    assert!(config.check().is_ok());
    assert_eq!(config.listing.default_limit, 50);
}

// =============================================================================
// Configured server
// =============================================================================

fn configured_server() -> TestServer {
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let router = ServerBuilder::from_config(&config)
        .with_article_service(InMemoryArticleService::new())
        .build()
        .unwrap();
    TestServer::try_new(router).unwrap()
}

fn editor() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(AUTH_TOKEN_HEADER),
        HeaderValue::from_static("editorToken"),
    )
}

#[tokio::test]
async fn test_configured_listing_bounds() {
    let server = configured_server();
    let (name, value) = editor();
    for i in 0..4 {
        server
            .put("/article/")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "title": format!("t{}", i), "body": "b" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server.get("/article/").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["limit"], 2);

    // Clamped to max_limit
    let body: Value = server.get("/article/?limit=100").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["pagination"]["limit"], 3);
    assert_eq!(body["pagination"]["total"], 4);
}

#[tokio::test]
async fn test_configured_policies() {
    let server = configured_server();
    let (name, value) = editor();

    let created: Value = server
        .put("/article/")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "t", "body": "b" }))
        .await
        .json();
    let path = format!("/article/{}", created["id"].as_str().unwrap());

    server
        .patch(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "edited" }))
        .await
        .assert_status(StatusCode::OK);

    server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
