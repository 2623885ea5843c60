//! Database operations for the Beauty Queen `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `app_user` - Accounts (email, argon2 password hash, profile fields)
//! - `otp_code` - One-time email verification codes
//! - `product` - Catalog
//! - `cart_item` - Shopping cart lines
//! - `customer_order` / `order_item` - Orders
//! - `feedback` - Customer feedback
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p beauty-queen-cli -- migrate
//! ```
//!
//! Repositories use the runtime query API with `#[derive(sqlx::FromRow)]`
//! row structs converted through `TryFrom`, so the workspace builds without
//! a live database.

pub mod cart;
pub mod feedback;
pub mod orders;
pub mod otps;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use feedback::FeedbackRepository;
pub use orders::OrderRepository;
pub use otps::OtpRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
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
