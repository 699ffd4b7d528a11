//! Axum extractors for validated payloads
//!
//! `ValidatedBody<R>` and `ValidatedQuery<R>` decode the request into a flat
//! [`Payload`] and run it through the rule table declared by `R` before the
//! handler sees it.

use super::rules::RuleTable;
use super::validators::{validate, validate_required};
use crate::core::error::{ApiError, RequestError};
use crate::core::field::Payload;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use std::marker::PhantomData;

/// Rules declared by an endpoint
///
/// Implemented by zero-sized marker types, one per endpoint input.
pub trait EndpointRules: Send + Sync + 'static {
    /// Accepted fields and their value rules
    fn rules() -> &'static RuleTable;

    /// Fields that must be present
    fn required() -> &'static [&'static str] {
        &[]
    }
}

/// JSON body decoded and validated against `R`
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_article(
///     ValidatedBody(payload, _): ValidatedBody<ArticleCreateRules>,
/// ) -> ApiResult<Json<Article>> {
///     // payload only carries declared, valid fields
/// }
/// ```
pub struct ValidatedBody<R>(pub Payload, pub PhantomData<R>);

impl<R> std::ops::Deref for ValidatedBody<R> {
    type Target = Payload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, R> FromRequest<S> for ValidatedBody<R>
where
    S: Send + Sync,
    R: EndpointRules,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Content-Type is not enforced: clients send JSON under several types
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let payload = Payload::from_json(value)?;

        validate(&payload, R::rules())?;
        validate_required(&payload, R::required())?;

        Ok(ValidatedBody(payload, PhantomData))
    }
}

/// Query string decoded and validated against `R`
pub struct ValidatedQuery<R>(pub Payload, pub PhantomData<R>);

impl<R> std::ops::Deref for ValidatedQuery<R> {
    type Target = Payload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, R> FromRequestParts<S> for ValidatedQuery<R>
where
    S: Send + Sync,
    R: EndpointRules,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(
            |e| RequestError::InvalidQuery {
                message: e.body_text(),
            },
        )?;
        let payload = Payload::from_pairs(pairs);

        validate(&payload, R::rules())?;
        validate_required(&payload, R::required())?;

        Ok(ValidatedQuery(payload, PhantomData))
    }
}
