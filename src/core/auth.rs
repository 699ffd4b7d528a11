//! Authorization for article endpoints
//!
//! Requests authenticate with a static token in the `X-AUTH-TOKEN` header:
//! - no header: anonymous (public reads still work)
//! - known token: the configured user and roles
//! - unknown token: rejected with 401

use crate::config::{AuthConfig, PolicyConfig};
use crate::core::error::{ApiResult, RequestError};
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::collections::HashMap;

/// Header carrying the API token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User { user: String, roles: Vec<String> },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Get the user name if available
    pub fn user(&self) -> Option<&str> {
        match self {
            AuthContext::User { user, .. } => Some(user),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthContext::Anonymous)
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.iter().any(|r| r == role),
            AuthContext::Anonymous => false,
        }
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<String>),
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !context.is_anonymous(),

            AuthPolicy::HasRole(required_roles) => {
                required_roles.iter().any(|r| context.has_role(r))
            }
        }
    }

    /// Check the policy, turning a refusal into the matching request error
    ///
    /// Anonymous callers get `Unauthorized`; authenticated callers that fail
    /// the policy get `Forbidden`.
    pub fn enforce(&self, context: &AuthContext) -> Result<(), RequestError> {
        if self.check(context) {
            return Ok(());
        }
        if context.is_anonymous() {
            Err(RequestError::Unauthorized {
                message: "Authentication Required".to_string(),
            })
        } else {
            Err(RequestError::Forbidden {
                message: "Access forbidden".to_string(),
            })
        }
    }

    /// Parse policy from string (for YAML config)
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AuthPolicy::Public,
            "authenticated" => AuthPolicy::Authenticated,
            s if s.starts_with("role:") => {
                let roles = s["role:".len()..]
                    .split('|')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect();
                AuthPolicy::HasRole(roles)
            }
            _ => AuthPolicy::Authenticated, // Default
        }
    }
}

/// Policies guarding the mutating article operations
#[derive(Debug, Clone)]
pub struct AccessPolicies {
    pub create: AuthPolicy,
    pub update: AuthPolicy,
    pub delete: AuthPolicy,
}

impl AccessPolicies {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            create: AuthPolicy::parse_policy(&config.create),
            update: AuthPolicy::parse_policy(&config.update),
            delete: AuthPolicy::parse_policy(&config.delete),
        }
    }
}

impl Default for AccessPolicies {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from request headers
    async fn extract_context(&self, headers: &HeaderMap) -> ApiResult<AuthContext>;
}

/// Provider backed by a static token table
#[derive(Debug, Clone, Default)]
pub struct TokenAuthProvider {
    tokens: HashMap<String, AuthContext>,
}

impl TokenAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        config
            .tokens
            .iter()
            .fold(Self::new(), |provider, entry| {
                provider.with_token(&entry.token, &entry.user, entry.roles.clone())
            })
    }

    /// Register a token for `user` with `roles`
    pub fn with_token(mut self, token: &str, user: &str, roles: Vec<String>) -> Self {
        self.tokens.insert(
            token.to_string(),
            AuthContext::User {
                user: user.to_string(),
                roles,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> ApiResult<AuthContext> {
        let Some(value) = headers.get(AUTH_TOKEN_HEADER) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = value.to_str().map_err(|_| RequestError::Unauthorized {
            message: "Malformed authentication token".to_string(),
        })?;

        match self.tokens.get(token) {
            Some(context) => {
                tracing::debug!(user = context.user(), "token authenticated");
                Ok(context.clone())
            }
            None => Err(RequestError::Unauthorized {
                message: "Invalid authentication token".to_string(),
            }
            .into()),
        }
    }
}
