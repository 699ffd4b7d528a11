//! Service trait for article storage

use crate::core::query::ListParams;
use crate::entities::{Article, ArticleDraft, ArticlePatch};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing articles
///
/// Implementations own the timestamps: `create` stamps both, `update` moves
/// `updated_at` forward. Handlers are agnostic to the storage mechanism.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Create a new article
    async fn create(&self, draft: ArticleDraft) -> Result<Article>;

    /// Get an article by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Article>>;

    /// List one page of articles and the total count
    async fn list(&self, params: &ListParams) -> Result<(Vec<Article>, u64)>;

    /// Apply a partial update, returning `None` for an unknown ID
    async fn update(&self, id: &Uuid, patch: ArticlePatch) -> Result<Option<Article>>;

    /// Delete an article, returning whether it existed
    async fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Count stored articles
    async fn count(&self) -> Result<u64>;
}
