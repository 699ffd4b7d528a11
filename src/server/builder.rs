//! ServerBuilder for fluent API to build HTTP servers

use super::router::{build_article_routes, health_routes};
use super::state::AppState;
use crate::config::{AppConfig, ListingConfig};
use crate::core::auth::{AUTH_TOKEN_HEADER, AccessPolicies, AuthProvider, TokenAuthProvider};
use crate::core::error::ConfigError;
use crate::core::service::ArticleService;
use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the article HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_article_service(InMemoryArticleService::new())
///     .with_auth_provider(TokenAuthProvider::new().with_token("secretToken", "alice", vec!["USER".into()]))
///     .build()?;
/// ```
pub struct ServerBuilder {
    articles: Option<Arc<dyn ArticleService>>,
    auth: Option<Arc<dyn AuthProvider>>,
    policies: AccessPolicies,
    listing: ListingConfig,
    cors_origins: Vec<String>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            articles: None,
            auth: None,
            policies: AccessPolicies::default(),
            listing: ListingConfig::default(),
            cors_origins: Vec::new(),
        }
    }

    /// Take auth tokens, policies, listing bounds and CORS origins from `config`
    ///
    /// The storage backend is not created here; it needs an async connect for
    /// postgres and is set with [`with_article_service`](Self::with_article_service).
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_auth_provider(TokenAuthProvider::from_config(&config.auth))
            .with_policies(AccessPolicies::from_config(&config.auth.policies))
            .with_listing(config.listing)
            .with_cors_origins(config.server.cors_origins.clone())
    }

    /// Set the article service (required)
    pub fn with_article_service(self, service: impl ArticleService + 'static) -> Self {
        self.with_article_service_arc(Arc::new(service))
    }

    /// Set an already shared article service
    pub fn with_article_service_arc(mut self, service: Arc<dyn ArticleService>) -> Self {
        self.articles = Some(service);
        self
    }

    /// Set the auth provider (defaults to an empty token table)
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    pub fn with_policies(mut self, policies: AccessPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - Health routes
    /// - Article CRUD routes
    ///
    /// wrapped in request tracing and, when origins are configured, CORS.
    pub fn build(self) -> Result<Router> {
        let articles = self
            .articles
            .ok_or_else(|| anyhow!("Article service is required"))?;
        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(TokenAuthProvider::new()));

        let state = AppState {
            articles,
            auth,
            policies: Arc::new(self.policies),
            listing: self.listing,
        };

        let mut app = health_routes().merge(build_article_routes(state));

        if !self.cors_origins.is_empty() {
            app = app.layer(build_cors_layer(&self.cors_origins)?);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "server.cors_origins".to_string(),
                    value: origin.clone(),
                    message: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(AUTH_TOKEN_HEADER)])
        .max_age(Duration::from_secs(3600)))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
