//! Principal extractor
//!
//! Handlers behind [`authorize_request`](crate::auth::authorize_request) can
//! take a [`Principal`] argument directly.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::Principal;

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Public routes never get a principal
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
