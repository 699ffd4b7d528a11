//! Route table for the article API

use super::handlers::{create_article, delete_article, get_article, list_articles, update_article};
use super::state::AppState;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build article routes
///
/// - GET /article/ - List articles (`sortField`, `sortOrder`, `limit`, `offset`)
/// - PUT, POST /article/ - Create an article
/// - GET /article/{id} - Get one article
/// - PATCH /article/{id} - Update title and/or body
/// - DELETE /article/{id} - Remove an article
///
/// The collection is served with and without the trailing slash.
pub fn build_article_routes(state: AppState) -> Router {
    let collection = || {
        get(list_articles)
            .put(create_article)
            .post(create_article)
    };

    Router::new()
        .route("/article/", collection())
        .route("/article", collection())
        .route(
            "/article/{id}",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
