//! Custom Axum extractors.

mod id_query;
mod validated;

pub use id_query::*;
pub use validated::*;
