//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! an `ArticleService` through full REST round-trips:
//! JSON → HTTP request → validation → handler → ArticleService → HTTP response.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_rest_create`: PUT 201 + article JSON
//! - `test_rest_create_with_post`: POST is accepted like PUT
//! - `test_rest_get`: GET 200 + same article
//! - `test_rest_update`: PATCH 200 + partial update
//! - `test_rest_delete`: DELETE 200 + message, then GET 404
//!
//! ## Listing
//! - `test_rest_list_limit`: `limit=1` returns one item
//! - `test_rest_list_sorted_page`: sortField/sortOrder/limit/offset slice
//! - `test_rest_list_zero_limit`: empty page reports no next page
//! - `test_rest_list_empty_sort_field`: `sortField=` falls back to the default
//!
//! ## Error handling
//! - `test_rest_error_not_found`: GET/PATCH/DELETE unknown ID → 404
//! - `test_rest_error_invalid_uuid`: GET with garbage ID → 400
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use article_api::core::service::ArticleService;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use std::sync::Arc;
            use uuid::Uuid;

            async fn make_server() -> TestServer {
                let service: Arc<dyn ArticleService> = Arc::new($factory);
                TestServer::try_new(build_test_router(service)).unwrap()
            }

            async fn create(server: &TestServer, title: &str, body: &str) -> Value {
                let response = server
                    .put("/article/")
                    .add_header(auth_header(), token(WRITER_TOKEN))
                    .json(&json!({ "title": title, "body": body }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;
                let body = create(&server, "title3", "body3").await;

                assert_eq!(body["title"], "title3");
                assert_eq!(body["body"], "body3");
                assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
                assert!(body["created_at"].is_string());
                assert!(body["updated_at"].is_string());
            }

            #[tokio::test]
            async fn test_rest_create_with_post() {
                let server = make_server().await;
                let response = server
                    .post("/article/")
                    .add_header(auth_header(), token(READER_TOKEN))
                    .json(&json!({ "title": "posted", "body": "via POST" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, "Title", "Body").await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/article/{}", id)).await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["id"], id);
                assert_eq!(body["title"], "Title");
            }

            #[tokio::test]
            async fn test_rest_update() {
                let server = make_server().await;
                let created = create(&server, "Title", "Body").await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .patch(&format!("/article/{}", id))
                    .add_header(auth_header(), token(WRITER_TOKEN))
                    .json(&json!({ "body": "Rewritten" }))
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["title"], "Title");
                assert_eq!(body["body"], "Rewritten");
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, "Title", "Body").await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .delete(&format!("/article/{}", id))
                    .add_header(auth_header(), token(WRITER_TOKEN))
                    .await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["message"], "The article was successfully removed");

                server
                    .get(&format!("/article/{}", id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Listing
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list_limit() {
                let server = make_server().await;
                create(&server, "one", "body").await;
                create(&server, "two", "body").await;

                let response = server.get("/article/?limit=1").await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["data"].as_array().unwrap().len(), 1);
                assert_eq!(body["pagination"]["limit"], 1);
                assert_eq!(body["pagination"]["offset"], 0);
                assert_eq!(body["pagination"]["total"], 2);
                assert_eq!(body["pagination"]["has_next"], true);
            }

            #[tokio::test]
            async fn test_rest_list_sorted_page() {
                let server = make_server().await;
                for title in ["d", "b", "a", "c"] {
                    create(&server, title, "body").await;
                }

                let response = server
                    .get("/article/?sortField=title&sortOrder=ASC&limit=2&offset=1")
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                let titles: Vec<_> = body["data"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|a| a["title"].as_str().unwrap().to_string())
                    .collect();
                assert_eq!(titles, vec!["b", "c"]);
                assert_eq!(body["pagination"]["has_next"], true);
            }

            #[tokio::test]
            async fn test_rest_list_zero_limit() {
                let server = make_server().await;
                create(&server, "only", "body").await;

                let response = server.get("/article/?limit=0").await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert!(body["data"].as_array().unwrap().is_empty());
                assert_eq!(body["pagination"]["total"], 1);
                assert_eq!(body["pagination"]["has_next"], false);
            }

            #[tokio::test]
            async fn test_rest_list_empty_sort_field() {
                let server = make_server().await;
                create(&server, "only", "body").await;

                let response = server.get("/article/?sortField=&sortOrder=ASC").await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["data"].as_array().unwrap().len(), 1);
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;
                let path = format!("/article/{}", Uuid::new_v4());

                let response = server.get(&path).await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "ENTITY_NOT_FOUND");
                assert!(body["message"].as_str().unwrap().starts_with("No article found for id:"));

                server
                    .patch(&path)
                    .add_header(auth_header(), token(WRITER_TOKEN))
                    .json(&json!({ "title": "x" }))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                server
                    .delete(&path)
                    .add_header(auth_header(), token(WRITER_TOKEN))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_error_invalid_uuid() {
                let server = make_server().await;
                let response = server.get("/article/not-a-uuid").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_ENTITY_ID");
            }
        }
    };
}
