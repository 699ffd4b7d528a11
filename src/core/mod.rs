//! Core module containing the fundamental types of the article API

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AccessPolicies, AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider};
pub use entity::Entity;
pub use error::{ApiError, ApiResult};
pub use field::{FieldValue, Payload};
pub use query::{ListParams, ListQueryRules, PaginatedResponse, PaginationMeta, SortField, SortOrder};
pub use service::ArticleService;
pub use validation::{EndpointRules, FieldRule, RuleTable, ValidatedBody, ValidatedQuery};
