//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{QuestionId, ValidationError};

/// Header carrying the shared moderator secret
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extract and validate a question id from path
pub struct QuestionIdPath(pub QuestionId);

impl<S> FromRequestParts<S> for QuestionIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be a positive integer",
                })
            })?;

        let id = QuestionId::parse(&id)?;
        Ok(Self(id))
    }
}

/// JSON body whose rejections render as JSON validation errors
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError::Validation(ValidationError::Malformed {
                    field: "body",
                    detail: rejection.body_text(),
                })
            })?;

        Ok(Self(value))
    }
}

/// Query string whose rejections render as JSON validation errors
pub struct JsonQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for JsonQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                ApiError::Validation(ValidationError::Malformed {
                    field: "query",
                    detail: rejection.body_text(),
                })
            })?;

        Ok(Self(value))
    }
}

/// Guard for moderator endpoints.
///
/// Succeeds only when `X-Admin-Token` equals the configured token.
/// Runs before any store access.
pub struct RequireAdmin;

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.admin_token.as_deref().ok_or_else(|| {
            tracing::warn!(path = %parts.uri.path(), "admin request but no admin token configured");
            ApiError::AdminDisabled
        })?;

        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(token) if constant_time_eq(token, expected) => Ok(Self),
            Some(_) => {
                tracing::warn!(path = %parts.uri.path(), "rejected admin request: token mismatch");
                Err(ApiError::Unauthorized)
            }
            None => {
                tracing::warn!(path = %parts.uri.path(), "rejected admin request: token missing");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

/// Constant-time string comparison so token checks don't leak match length
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
