//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresArticleService` backed by a PostgreSQL database via
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! article-api = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Articles live in a single `articles` table. `ensure_schema` creates it
//! along with indexes on the sortable timestamp columns.

use crate::core::error::StorageError;
use crate::core::query::{ListParams, SortField};
use crate::core::service::ArticleService;
use crate::entities::{Article, ArticleDraft, ArticlePatch};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

const BACKEND: &str = "postgres";

fn query_error(context: &str, err: sqlx::Error) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, err),
    }
}

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required table and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS articles (
            id UUID PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            body TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| query_error("Failed to create articles table", e))?;

    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)",
        "CREATE INDEX IF NOT EXISTS idx_articles_updated_at ON articles (updated_at)",
    ] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| query_error("Failed to create articles index", e))?;
    }

    Ok(())
}

fn order_column(field: SortField) -> &'static str {
    match field {
        SortField::Title => "title",
        SortField::Body => "body",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    }
}

/// Article storage service backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let service = PostgresArticleService::connect("postgres://localhost/articles").await?;
/// service.ensure_schema().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresArticleService {
    pool: PgPool,
}

impl PostgresArticleService {
    /// Create a new `PostgresArticleService` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(pool))
    }

    /// Create the articles table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ArticleService for PostgresArticleService {
    async fn create(&self, draft: ArticleDraft) -> Result<Article> {
        let article = Article::new(draft);

        sqlx::query(
            "INSERT INTO articles (id, title, body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.body)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create article", e))?;

        Ok(article)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(
            "SELECT id, title, body, created_at, updated_at FROM articles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get article", e))?;

        Ok(article)
    }

    async fn list(&self, params: &ListParams) -> Result<(Vec<Article>, u64)> {
        // Column and direction come from closed enums, never from request text
        let sql = format!(
            "SELECT id, title, body, created_at, updated_at FROM articles
             ORDER BY {} {}, id ASC
             LIMIT $1 OFFSET $2",
            order_column(params.sort_field),
            params.sort_order.as_str(),
        );

        let limit = i64::try_from(params.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(params.offset).unwrap_or(i64::MAX);

        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list articles", e))?;

        let total = self.count().await?;
        Ok((articles, total))
    }

    async fn update(&self, id: &Uuid, patch: ArticlePatch) -> Result<Option<Article>> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let article = sqlx::query_as::<_, Article>(
            "UPDATE articles
             SET title = COALESCE($2, title),
                 body = COALESCE($3, body),
                 updated_at = GREATEST(NOW(), created_at)
             WHERE id = $1
             RETURNING id, title, body, created_at, updated_at",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update article", e))?;

        Ok(article)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete article", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to count articles", e))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
