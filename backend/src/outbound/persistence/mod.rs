//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the shopping-cart and short-link repository
//! ports backed by PostgreSQL through `diesel-async` with `bb8` pooling.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! internal; callers only see domain types and repository errors.
//!
//! # Example
//!
//! ```ignore
//! use foodgram::outbound::persistence::{DbPool, DieselShortLinkRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/foodgram")).await?;
//! let repo = DieselShortLinkRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_shopping_cart_repository;
mod diesel_short_link_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_shopping_cart_repository::DieselShoppingCartRepository;
pub use diesel_short_link_repository::DieselShortLinkRepository;
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
