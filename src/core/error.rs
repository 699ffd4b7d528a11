//! Typed error handling for the article API
//!
//! Every handler returns [`ApiError`], which knows its HTTP status code and a
//! stable machine-readable error code. Clients can match on the category
//! instead of parsing messages.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Errors related to article lookups (not found)
//! - [`ValidationError`]: Rejected request fields
//! - [`RequestError`]: Malformed requests and authentication failures
//! - [`StorageError`]: Storage backend failures
//! - [`ConfigError`]: Configuration loading and parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use article_api::prelude::*;
//!
//! async fn load(service: &dyn ArticleService, id: Uuid) -> ApiResult<Article> {
//!     service.get(&id).await?.ok_or_else(|| EntityError::not_found("article", id).into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the article API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity lookups
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Request field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed requests and authentication
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Request(e) => e.status_code(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Request(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Server-class errors carry a generic message; the full error is only
    /// logged.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            ApiError::Validation(ValidationError::InvalidValue { field, allowed }) => {
                Some(serde_json::json!({
                    "field": field,
                    "allowed": allowed
                }))
            }
            ApiError::Validation(err) => Some(serde_json::json!({ "field": err.field() })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("No {entity_type} found for id: {id}")]
    NotFound { entity_type: String, id: Uuid },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A request field was rejected by a rule table or a field constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload carries a field the endpoint does not declare
    #[error("The field '{field}' is not accepted by this endpoint")]
    UnknownField { field: String },

    /// The field value is outside its allowed set or does not match its pattern
    ///
    /// `allowed` is empty for pattern rules.
    #[error("{}", invalid_value_message(.field, .allowed))]
    InvalidValue { field: String, allowed: Vec<String> },

    /// A field the endpoint requires was not submitted
    #[error("The field '{field}' is mandatory. Please provide it")]
    MissingField { field: String },

    /// The field has the wrong type or violates a length constraint
    #[error("The field '{field}' is invalid: {message}")]
    Constraint { field: String, message: String },
}

fn invalid_value_message(field: &str, allowed: &[String]) -> String {
    if allowed.is_empty() {
        format!("The field '{field}' value is incorrect. Please use correct value")
    } else {
        format!(
            "The field '{field}' value is incorrect. Please use only one from the following list: {}",
            allowed.join(", ")
        )
    }
}

impl ValidationError {
    /// Name of the rejected field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::UnknownField { field }
            | ValidationError::InvalidValue { field, .. }
            | ValidationError::MissingField { field }
            | ValidationError::Constraint { field, .. } => field,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownField { .. } => "UNKNOWN_FIELD",
            ValidationError::InvalidValue { .. } => "INVALID_FIELD_VALUE",
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::Constraint { .. } => "FIELD_CONSTRAINT",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body could not be decoded into a flat payload
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// The query string could not be decoded
    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },

    /// Invalid entity ID format
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },

    /// Missing or unknown credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but not allowed
    #[error("Forbidden: {message}")]
    Forbidden { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query or operation failure inside the backend
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field, sorted for a stable message
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let Some((field, field_errors)) = fields.into_iter().next() else {
            return ApiError::Internal("empty validation error set".to_string());
        };

        let message = field_errors
            .first()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .unwrap_or_default();

        ApiError::Validation(ValidationError::Constraint {
            field: field.to_string(),
            message,
        })
    }
}

/// Storage traits return `anyhow::Error`; anything that is not already an
/// `ApiError` becomes an internal error.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => match err.downcast::<StorageError>() {
                Ok(storage_err) => ApiError::Storage(storage_err),
                Err(err) => ApiError::Internal(err.to_string()),
            },
        }
    }
}

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
