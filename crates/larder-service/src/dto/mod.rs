//! Request DTOs for the user access layer.

mod user_dto;

pub use user_dto::*;
