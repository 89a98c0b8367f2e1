//! Query-string id extractor.

use crate::responses::error_body;
use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use larder_core::UserId;
use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=N` query parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// User id.
    #[param(value_type = i32, example = 1)]
    pub id: UserId,
}

/// Extracts the user id from the `id` query parameter.
///
/// A missing or non-integer id is rejected with 400 `INVALID_QUERY`.
#[derive(Debug, Clone, Copy)]
pub struct UserIdQuery(pub UserId);

/// Rejection for a missing or malformed `id` parameter.
#[derive(Debug)]
pub struct InvalidQuery(pub QueryRejection);

impl IntoResponse for InvalidQuery {
    fn into_response(self) -> Response {
        error_body(
            StatusCode::BAD_REQUEST,
            "INVALID_QUERY",
            format!("Invalid query: {}", self.0.body_text()),
        )
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserIdQuery
where
    S: Send + Sync,
{
    type Rejection = InvalidQuery;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<IdQuery>::from_request_parts(parts, state)
            .await
            .map_err(InvalidQuery)?;
        Ok(Self(query.id))
    }
}
