//! `PostgreSQL` persistence for the Abyssal world engine.
//!
//! Implements the engine's `WorldStore` port on top of `sqlx`. The schema
//! lives in `migrations/` and is applied at startup via
//! [`PostgresPool::run_migrations`].
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool configuration and lifecycle
//! - [`world_store`] -- The [`PgWorldStore`] adapter
//! - [`error`] -- The [`DbError`] type

pub mod error;
pub mod postgres;
pub mod world_store;

pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use world_store::PgWorldStore;
