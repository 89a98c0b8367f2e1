//! # Larder Config
//!
//! Configuration management for Larder.
//! Supports layered configuration from files and environment variables,
//! validated up front so a bad deployment fails at startup.

mod app_config;
mod backend;
mod loader;
mod validation;

pub use app_config::*;
pub use backend::*;
pub use loader::*;
pub use validation::*;
