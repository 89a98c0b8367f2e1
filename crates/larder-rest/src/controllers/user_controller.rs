//! User controller.
//!
//! All four operations share the root path; ids travel in the `id` query
//! parameter for reads and deletes and in the JSON body for updates.

use crate::{
    extractors::{IdQuery, UserIdQuery, ValidatedJson},
    responses::{ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use larder_core::{ErrorResponse, User};
use larder_service::{CreateUserRequest, UpdateUserRequest};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_user)
            .post(create_user)
            .put(update_user)
            .delete(delete_user),
    )
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    debug!("Create user request: {}", request.name);

    let user = state.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/",
    tag = "users",
    params(IdQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdQuery(id): UserIdQuery,
) -> ApiResult<User> {
    debug!("Get user request: {}", id);

    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace an existing user.
#[utoipa::path(
    put,
    path = "/",
    tag = "users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<User> {
    debug!("Update user request: {}", request.id);

    let user = state.user_service.update_user(request).await?;
    Ok(Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/",
    tag = "users",
    params(IdQuery),
    responses(
        (status = 204, description = "User deleted, or did not exist"),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdQuery(id): UserIdQuery,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
