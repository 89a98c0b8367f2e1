//! User-related DTOs.

use larder_core::rules::not_blank;
use larder_core::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
///
/// Any `id` in the payload is ignored; the store assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 255, message = "Name cannot exceed 255 characters")
    )]
    #[schema(example = "Alice")]
    pub name: String,
}

/// Request to replace an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(value_type = i32, example = 1)]
    pub id: UserId,

    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 255, message = "Name cannot exceed 255 characters")
    )]
    #[schema(example = "Bob")]
    pub name: String,
}
