//! # stream-db
//!
//! Database layer implementing the storage ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the PostgreSQL storage gateway for the ports
//! defined in `stream-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → Entity mappers
//! - A transaction-scoped unit of work implementing every repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stream_common::AppConfig;
//! use stream_core::traits::{Database, LivestreamRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let db = stream_db::connect(&config.database).await?;
//!
//!     let mut tx = db.begin().await?;
//!     let livestream = tx.find_livestream(1).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{connect, create_pool, run_migrations, PgPool};
pub use repositories::{map_db_error, PgDatabase, PgUnitOfWork};
