//! User service implementations.
//!
//! Trait definitions live in the parent module (`user_service.rs`).

pub mod user_service_impl;

pub use user_service_impl::UserServiceImpl;
