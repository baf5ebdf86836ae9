//! # Campgrounds booking service
//!
//! Campsite reservations that never overlap, even under concurrent writes.
//!
//! ## Architecture
//!
//! - **domain**: entities, the date-range overlap predicate, errors and
//!   repository traits
//! - **application**: booking rules and use-case services
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: retry policy and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
