//! Domain entities for Larder.

mod user;

pub use user::*;
