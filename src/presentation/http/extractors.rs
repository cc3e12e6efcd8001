use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::Deserialize;

use super::error::HttpError;

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

/// Bearer token from the `Authorization` header. Browsers cannot set headers
/// on an `EventSource`, so an `access_token` query parameter is accepted as
/// a fallback.
fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(header.token().to_string());
    }
    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(query)| query.access_token)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;
        let token = bearer_token(parts).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })?;

        let user = state
            .services
            .authenticate(&token)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}
