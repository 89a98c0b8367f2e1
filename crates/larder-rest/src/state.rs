//! Application state for Axum handlers.

use larder_core::HealthCheck;
use larder_service::UserService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Probes consulted by the readiness endpoint.
    pub health_checks: Arc<[Arc<dyn HealthCheck>]>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        health_checks: Vec<Arc<dyn HealthCheck>>,
    ) -> Self {
        Self {
            user_service,
            health_checks: health_checks.into(),
        }
    }
}
