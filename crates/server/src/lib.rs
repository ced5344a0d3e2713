//! Clothy Server - Storefront JSON API.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - `PostgreSQL` via sqlx for carts, addresses, orders and profiles
//! - Tower-sessions for the authentication seam (the external auth
//!   collaborator deposits the principal; extractors read it)
//! - Sentry + tracing for error tracking and logs
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Repositories over the `PostgreSQL` pool
//! - [`error`] - Unified `AppError` with JSON error bodies
//! - [`middleware`] - Session layer and principal extractors
//! - [`models`] - Domain structs and wire types
//! - [`routes`] - HTTP handlers
//! - [`services`] - Checkout (the order assembler)
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
