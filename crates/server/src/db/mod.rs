//! Database operations for the Clothy `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `user_account` - Profile directory (names, email, role; no credentials)
//! - `address` - Shipping addresses, at most one default per owner
//! - `cart_line` - Server-side carts, unique per (owner, product name)
//! - `store_order` - Order headers with denormalized address snapshots
//! - `order_item` - Order lines, owned by their header
//! - `session` - Tower-sessions storage
//!
//! Repositories signal "absent" with `Option`/`bool` return values; the
//! error enum is reserved for genuine failures.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p clothy-cli -- migrate
//! ```

pub mod addresses;
pub mod cart;
pub mod orders;
pub mod profiles;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use cart::CartRepository;
pub use orders::OrderRepository;
pub use profiles::ProfileRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
