//! # Larder Server Library
//!
//! Component wiring, logging and metrics setup, and startup output for
//! the Larder server binary.

pub mod di;
pub mod startup;
pub mod telemetry;

pub use di::AppComponents;
