//! HTTP handlers for article operations

use super::state::{AppState, Authorized, CreateOp, DeleteOp, UpdateOp};
use crate::core::entity::Entity;
use crate::core::error::{ApiResult, EntityError, RequestError};
use crate::core::query::{ListParams, ListQueryRules, PaginatedResponse};
use crate::core::validation::{ValidatedBody, ValidatedQuery};
use crate::entities::{Article, ArticleCreateRules, ArticleDraft, ArticlePatch, ArticleUpdateRules};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned by a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_id(id: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(id).map_err(|_| RequestError::InvalidEntityId { id: id.to_string() })
}

fn not_found(id: Uuid) -> EntityError {
    EntityError::not_found(Article::resource_name(), id)
}

/// GET /article/
pub async fn list_articles(
    State(state): State<AppState>,
    ValidatedQuery(query, _): ValidatedQuery<ListQueryRules>,
) -> ApiResult<Json<PaginatedResponse<Article>>> {
    let params = ListParams::from_payload(&query, &state.listing)?;
    let (articles, total) = state.articles.list(&params).await?;

    tracing::debug!(
        sort_field = %params.sort_field,
        sort_order = %params.sort_order,
        limit = params.limit,
        offset = params.offset,
        returned = articles.len(),
        total,
        "listed articles"
    );

    Ok(Json(PaginatedResponse::new(articles, &params, total)))
}

/// GET /article/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Article>> {
    let id = parse_id(&id)?;
    let article = state.articles.get(&id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(article))
}

/// PUT/POST /article/
pub async fn create_article(
    State(state): State<AppState>,
    auth: Authorized<CreateOp>,
    ValidatedBody(payload, _): ValidatedBody<ArticleCreateRules>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    let draft = ArticleDraft::from_payload(&payload)?;
    let article = state.articles.create(draft).await?;

    tracing::info!(id = %article.id, user = auth.context().user(), "article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// PATCH /article/{id}
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Authorized<UpdateOp>,
    ValidatedBody(payload, _): ValidatedBody<ArticleUpdateRules>,
) -> ApiResult<Json<Article>> {
    let id = parse_id(&id)?;
    let patch = ArticlePatch::from_payload(&payload)?;

    let article = state
        .articles
        .update(&id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(id = %article.id, user = auth.context().user(), "article updated");
    Ok(Json(article))
}

/// DELETE /article/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Authorized<DeleteOp>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    if !state.articles.delete(&id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(%id, user = auth.context().user(), "article removed");
    Ok(Json(MessageResponse {
        message: "The article was successfully removed".to_string(),
    }))
}
