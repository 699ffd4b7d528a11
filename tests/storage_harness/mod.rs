//! Shared test harness for article storage backends
//!
//! Provides draft helpers, a token table matching the fixtures used in the
//! REST tests, and a router builder that serves any `ArticleService` through
//! the full HTTP stack.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! article_service_tests!(InMemoryArticleService::new());
//! rest_integration_tests!(InMemoryArticleService::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod article_service_tests;
#[macro_use]
pub mod rest_tests;

use article_api::core::auth::{AUTH_TOKEN_HEADER, TokenAuthProvider};
use article_api::core::service::ArticleService;
use article_api::entities::ArticleDraft;
use article_api::server::ServerBuilder;
use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use std::sync::Arc;

/// Token granted the `USER` role (may create, update and delete)
pub const WRITER_TOKEN: &str = "secretToken";

/// Token for an authenticated user without roles (may create and update)
pub const READER_TOKEN: &str = "readerToken";

pub fn draft(title: &str, body: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        body: body.to_string(),
    }
}

pub fn test_auth_provider() -> TokenAuthProvider {
    TokenAuthProvider::new()
        .with_token(WRITER_TOKEN, "writer", vec!["USER".to_string()])
        .with_token(READER_TOKEN, "reader", vec![])
}

/// Build the application router over `service` with the test token table
pub fn build_test_router(service: Arc<dyn ArticleService>) -> Router {
    ServerBuilder::new()
        .with_article_service_arc(service)
        .with_auth_provider(test_auth_provider())
        .build()
        .expect("router should build")
}

pub fn auth_header() -> HeaderName {
    HeaderName::from_static(AUTH_TOKEN_HEADER)
}

pub fn token(value: &'static str) -> HeaderValue {
    HeaderValue::from_static(value)
}
