//! # Larder Repository
//!
//! The store layer: durable persistence for [`User`](larder_core::User)
//! records keyed by integer id.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository  |  InMemoryUserRepository
//!   ↓
//! MySQL (user_table)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
