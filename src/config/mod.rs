//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment
//! overrides. Every section has defaults suitable for local development.
//!
//! | Env Var                     | Overrides                 |
//! |-----------------------------|---------------------------|
//! | `ARTICLE_API_BIND`          | `server.bind`             |
//! | `ARTICLE_API_STORAGE`       | `storage.backend`         |
//! | `ARTICLE_API_DATABASE_URL`  | `storage.database_url`    |
//! | `ARTICLE_API_MAX_LIMIT`     | `listing.max_limit`       |
//! | `ARTICLE_API_SEED`          | `fixtures.count` (and enables seeding) |

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
    pub fixtures: FixturesConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub bind: String,

    /// Allowed CORS origins (empty disables the CORS layer)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_memory" | "memory" => Ok(StorageBackend::InMemory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                value: other.to_string(),
                message: "expected 'in_memory' or 'postgres'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Connection URL, required for the postgres backend
    pub database_url: Option<String>,
}

/// A static API token and the identity it authenticates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub token: String,
    pub user: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Policy strings per mutating operation
///
/// Parsed with `AuthPolicy::parse_policy`: `public`, `authenticated`,
/// `role:<NAME>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            create: "authenticated".to_string(),
            update: "authenticated".to_string(),
            delete: "role:USER".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<TokenConfig>,
    pub policies: PolicyConfig,
}

/// Defaults and bounds for the list endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 1000,
        }
    }
}

/// Startup seeding with random articles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    pub enabled: bool,
    pub count: usize,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 50,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from an optional file, then apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.check()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    ///
    /// Taking the lookup as a function keeps this testable without touching
    /// the process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("ARTICLE_API_BIND") {
            self.server.bind = bind;
        }
        if let Some(backend) = lookup("ARTICLE_API_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(url) = lookup("ARTICLE_API_DATABASE_URL") {
            self.storage.database_url = Some(url);
        }
        if let Some(max) = lookup("ARTICLE_API_MAX_LIMIT") {
            self.listing.max_limit = max.parse().map_err(|_| ConfigError::InvalidValue {
                field: "listing.max_limit".to_string(),
                value: max.clone(),
                message: "expected an unsigned integer".to_string(),
            })?;
        }
        if let Some(count) = lookup("ARTICLE_API_SEED") {
            self.fixtures.count = count.parse().map_err(|_| ConfigError::InvalidValue {
                field: "fixtures.count".to_string(),
                value: count.clone(),
                message: "expected an unsigned integer".to_string(),
            })?;
            self.fixtures.enabled = true;
        }
        Ok(self)
    }

    /// Reject inconsistent settings
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none()
        {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_url".to_string(),
                value: String::new(),
                message: "required by the postgres backend".to_string(),
            });
        }
        if self.listing.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.max_limit".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.listing.default_limit > self.listing.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "listing.default_limit".to_string(),
                value: self.listing.default_limit.to_string(),
                message: format!("exceeds listing.max_limit ({})", self.listing.max_limit),
            });
        }
        Ok(())
    }
}
