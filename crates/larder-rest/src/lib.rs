//! # Larder REST
//!
//! REST API layer using Axum. Exposes the user access layer at `/`
//! (query-parameter ids), plus health, readiness and API documentation.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
