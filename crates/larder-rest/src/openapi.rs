//! OpenAPI documentation for the REST API.

use crate::controllers::health_controller::{HealthResponse, ReadinessResponse};
use larder_core::{ErrorResponse, FieldError, User, UserId};
use larder_service::{CreateUserRequest, UpdateUserRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the Larder API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Larder API",
        description = "User records over a store with a read-through cache",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            User,
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            UpdateUserRequest,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User record endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
