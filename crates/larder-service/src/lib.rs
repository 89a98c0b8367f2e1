//! # Larder Service
//!
//! The user access layer: create, get, update and delete over a store,
//! with a read-through cache that is invalidated on every write.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
