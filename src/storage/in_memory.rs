//! In-memory implementation of ArticleService for testing and development

use crate::core::query::{ListParams, SortField, SortOrder};
use crate::core::service::ArticleService;
use crate::entities::{Article, ArticleDraft, ArticlePatch};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory article service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryArticleService {
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
}

impl InMemoryArticleService {
    /// Create a new in-memory article service
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryArticleService {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Article, b: &Article, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Body => a.body.cmp(&b.body),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl ArticleService for InMemoryArticleService {
    async fn create(&self, draft: ArticleDraft) -> Result<Article> {
        let article = Article::new(draft);

        let mut articles = self
            .articles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        articles.insert(article.id, article.clone());

        Ok(article)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Article>> {
        let articles = self
            .articles
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(articles.get(id).cloned())
    }

    async fn list(&self, params: &ListParams) -> Result<(Vec<Article>, u64)> {
        let articles = self
            .articles
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut sorted: Vec<&Article> = articles.values().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare(a, b, params.sort_field);
            let ordering = match params.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            // Ties break on id so pages never overlap
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let total = sorted.len() as u64;
        let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);

        let page = sorted
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: &Uuid, patch: ArticlePatch) -> Result<Option<Article>> {
        let mut articles = self
            .articles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(article) = articles.get_mut(id) else {
            return Ok(None);
        };

        if article.apply(patch) {
            article.touch();
        }

        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut articles = self
            .articles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(articles.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64> {
        let articles = self
            .articles
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(articles.len() as u64)
    }
}
