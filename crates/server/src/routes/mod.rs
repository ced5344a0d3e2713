//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (verifies database)
//!
//! # Cart (principal required)
//! GET    /api/cart                 - List cart lines
//! POST   /api/cart                 - Add product / increment existing line
//! DELETE /api/cart                 - Clear cart
//! DELETE /api/cart/{id}            - Remove one line
//!
//! # Addresses (principal required)
//! GET    /api/user/addresses       - List addresses (default first)
//! POST   /api/user/addresses       - Create address
//! PUT    /api/user/addresses/{id}  - Update address
//! DELETE /api/user/addresses/{id}  - Delete address
//!
//! # Orders (principal required)
//! GET    /api/orders               - Order history with nested items
//! POST   /api/orders               - Place order (checkout)
//!
//! # Admin (admin role required)
//! GET    /api/admin/users          - List user profiles
//! DELETE /api/admin/users/{id}     - Cascade-delete a user
//! GET    /api/admin/orders         - List all orders with customer names
//! PUT    /api/admin/orders/{id}    - Update order status fields
//! DELETE /api/admin/orders/{id}    - Delete an order and its items
//! ```

pub mod addresses;
pub mod admin;
pub mod cart;
pub mod orders;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cart::list).post(cart::add).delete(cart::clear),
        )
        .route("/{id}", delete(cart::remove))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route(
            "/{id}",
            put(addresses::update).delete(addresses::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", get(orders::list).post(orders::place))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/orders", get(admin::list_orders))
        .route(
            "/orders/{id}",
            put(admin::update_order).delete(admin::delete_order),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .nest("/api/user/addresses", address_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/admin", admin_routes())
}
