//! Shared handler state and the authorization extractor

use crate::config::ListingConfig;
use crate::core::auth::{AccessPolicies, AuthContext, AuthPolicy, AuthProvider};
use crate::core::error::ApiError;
use crate::core::service::ArticleService;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::marker::PhantomData;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleService>,
    pub auth: Arc<dyn AuthProvider>,
    pub policies: Arc<AccessPolicies>,
    pub listing: ListingConfig,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.auth.extract_context(&parts.headers).await
    }
}

/// A mutating article operation guarded by a configurable policy
pub trait Operation: Send + Sync + 'static {
    const NAME: &'static str;

    fn policy(policies: &AccessPolicies) -> &AuthPolicy;
}

pub struct CreateOp;
pub struct UpdateOp;
pub struct DeleteOp;

impl Operation for CreateOp {
    const NAME: &'static str = "create";

    fn policy(policies: &AccessPolicies) -> &AuthPolicy {
        &policies.create
    }
}

impl Operation for UpdateOp {
    const NAME: &'static str = "update";

    fn policy(policies: &AccessPolicies) -> &AuthPolicy {
        &policies.update
    }
}

impl Operation for DeleteOp {
    const NAME: &'static str = "delete";

    fn policy(policies: &AccessPolicies) -> &AuthPolicy {
        &policies.delete
    }
}

/// Caller identity that satisfied the policy of `O`
///
/// Runs from the request head, so an unauthorized caller is rejected before
/// the body is read or validated.
pub struct Authorized<O>(pub AuthContext, PhantomData<O>);

impl<O> Authorized<O> {
    pub fn context(&self) -> &AuthContext {
        &self.0
    }
}

impl<O: Operation> FromRequestParts<AppState> for Authorized<O> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let context = AuthContext::from_request_parts(parts, state).await?;

        if let Err(err) = O::policy(&state.policies).enforce(&context) {
            tracing::debug!(operation = O::NAME, user = context.user(), "access denied");
            return Err(err.into());
        }

        Ok(Authorized(context, PhantomData))
    }
}
