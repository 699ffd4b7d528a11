//! Article record and its request inputs

use crate::core::entity::Entity;
use crate::core::error::{ApiResult, ValidationError};
use crate::core::field::{FieldValue, Payload};
use crate::core::validation::{EndpointRules, RuleTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use validator::Validate;

/// A stored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article from a draft, stamped now
    pub fn new(draft: ArticleDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields set in `patch`, returning whether anything was set
    ///
    /// Does not touch `updated_at`; callers decide when a write counts.
    pub fn apply(&mut self, patch: ArticlePatch) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title {
            self.title = title;
            changed = true;
        }
        if let Some(body) = patch.body {
            self.body = body;
            changed = true;
        }
        changed
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

impl Entity for Article {
    fn resource_name() -> &'static str {
        "article"
    }
}

/// Input for creating an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ArticleDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 65535))]
    pub body: String,
}

impl ArticleDraft {
    /// Build a draft from a payload validated against [`ArticleCreateRules`]
    pub fn from_payload(payload: &Payload) -> ApiResult<Self> {
        let draft = Self {
            title: required_string(payload, "title")?,
            body: required_string(payload, "body")?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Partial update of an article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ArticlePatch {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 65535))]
    pub body: Option<String>,
}

impl ArticlePatch {
    /// Build a patch from a payload validated against [`ArticleUpdateRules`]
    pub fn from_payload(payload: &Payload) -> ApiResult<Self> {
        let patch = Self {
            title: optional_string(payload, "title")?,
            body: optional_string(payload, "body")?,
        };
        patch.validate()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

fn optional_string(payload: &Payload, field: &str) -> Result<Option<String>, ValidationError> {
    match payload.get(field) {
        None => Ok(None),
        Some(FieldValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::Constraint {
            field: field.to_string(),
            message: "must be a string".to_string(),
        }),
    }
}

fn required_string(payload: &Payload, field: &str) -> Result<String, ValidationError> {
    optional_string(payload, field)?.ok_or_else(|| ValidationError::MissingField {
        field: field.to_string(),
    })
}

fn article_fields() -> RuleTable {
    RuleTable::new().field("title").field("body")
}

/// Accepted body fields for `PUT`/`POST /article/`
pub struct ArticleCreateRules;

impl EndpointRules for ArticleCreateRules {
    fn rules() -> &'static RuleTable {
        static RULES: OnceLock<RuleTable> = OnceLock::new();
        RULES.get_or_init(article_fields)
    }

    fn required() -> &'static [&'static str] {
        &["title", "body"]
    }
}

/// Accepted body fields for `PATCH /article/{id}`
pub struct ArticleUpdateRules;

impl EndpointRules for ArticleUpdateRules {
    fn rules() -> &'static RuleTable {
        static RULES: OnceLock<RuleTable> = OnceLock::new();
        RULES.get_or_init(article_fields)
    }
}
