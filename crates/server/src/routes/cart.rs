//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use clothy_core::CartLineId;

use crate::db::{CartRepository, ProfileRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::AddToCartRequest;
use crate::models::CartLine;
use crate::state::AppState;

/// List the caller's cart.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<Json<Vec<CartLine>>> {
    let lines = CartRepository::new(state.pool()).list(principal.id).await?;
    Ok(Json(lines))
}

/// Add a product to the caller's cart, or increment the existing line.
///
/// The owner's display name is looked up and denormalized onto the line on
/// every write, so cart rows stay readable on their own.
#[instrument(skip(state, principal, request), fields(owner = %principal.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(request): Json<AddToCartRequest>,
) -> Result<Response> {
    let profile = ProfileRepository::new(state.pool())
        .get(principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    let upsert = CartRepository::new(state.pool())
        .add_or_increment(
            principal.id,
            &request.product_name,
            request.price,
            request.quantity,
            &profile.display_name(),
        )
        .await?;

    let body = if upsert.inserted {
        json!({
            "message": "Item added to cart successfully",
            "itemId": upsert.line.id,
        })
    } else {
        json!({ "message": "Cart updated successfully" })
    };

    Ok(Json(body).into_response())
}

/// Remove one line from the caller's cart.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<CartLineId>,
) -> Result<Json<serde_json::Value>> {
    let removed = CartRepository::new(state.pool())
        .remove_one(principal.id, id)
        .await?;

    if !removed {
        return Err(AppError::NotFound("Item not found".to_owned()));
    }

    Ok(Json(json!({ "message": "Item removed from cart successfully" })))
}

/// Clear the caller's cart.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let removed = CartRepository::new(state.pool()).clear(principal.id).await?;
    tracing::debug!(removed, "cart cleared");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Cart cleared successfully" })),
    ))
}
