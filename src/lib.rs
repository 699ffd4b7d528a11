//! # Article API
//!
//! A CRUD REST API for articles with declarative request-field validation.
//!
//! ## Features
//!
//! - **Rule Tables**: Each endpoint declares the fields it accepts, with optional allowed-value or regex rules
//! - **Typed Errors**: Every rejection maps to a status code and a stable error code
//! - **Token Auth**: Static `X-AUTH-TOKEN` tokens with per-operation policies
//! - **Pluggable Storage**: In-memory by default, PostgreSQL behind the `postgres` feature
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use article_api::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_article_service(InMemoryArticleService::new())
//!     .with_auth_provider(
//!         TokenAuthProvider::new().with_token("secretToken", "alice", vec!["USER".into()]),
//!     )
//!     .build()?;
//!
//! // GET  /article/?sortField=title&sortOrder=ASC&limit=10
//! // PUT  /article/        {"title": "...", "body": "..."}   (X-AUTH-TOKEN required)
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AUTH_TOKEN_HEADER, AccessPolicies, AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider},
        entity::Entity,
        error::{ApiError, ApiResult, EntityError, RequestError, ValidationError},
        field::{FieldValue, Payload},
        query::{ListParams, ListQueryRules, PaginatedResponse, PaginationMeta, SortField, SortOrder},
        service::ArticleService,
        validation::{
            EndpointRules, FieldRule, RuleTable, ValidatedBody, ValidatedQuery, validate,
            validate_required,
        },
    };

    // === Entities ===
    pub use crate::entities::{
        Article, ArticleCreateRules, ArticleDraft, ArticlePatch, ArticleUpdateRules,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryArticleService, seed_articles};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresArticleService;

    // === Config ===
    pub use crate::config::{AppConfig, ListingConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
