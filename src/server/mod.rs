//! Server module for building the article HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for articles, gated by the configured access policies
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use handlers::MessageResponse;
pub use router::{build_article_routes, health_routes};
pub use state::{AppState, Authorized, CreateOp, DeleteOp, Operation, UpdateOp};
