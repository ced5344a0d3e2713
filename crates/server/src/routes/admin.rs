//! Admin route handlers.
//!
//! All handlers here require the admin role via [`RequireAdmin`].

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use clothy_core::{OrderId, UserId};

use crate::db::{OrderRepository, ProfileRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::order::OrderHeader;
use crate::models::Profile;
use crate::state::AppState;

/// An order as the admin list shows it: header plus owner name.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub customer_name: String,
}

/// Request body for updating an order's status fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

/// List every user profile.
#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Profile>>> {
    let profiles = ProfileRepository::new(state.pool()).list_all().await?;
    Ok(Json(profiles))
}

/// Delete a user and everything the user owns.
///
/// Responds with how many rows of each kind were removed.
#[instrument(skip(state, _admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>> {
    let counts = ProfileRepository::new(state.pool())
        .cascade_delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    tracing::info!(user = %id, ?counts, "user cascade-deleted");

    Ok(Json(json!({
        "message": "User deleted successfully",
        "deletedItems": counts,
    })))
}

/// List every order with the owner's name, newest first.
#[instrument(skip(state, _admin))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminOrderView>>> {
    let orders = OrderRepository::new(state.pool())
        .list_all_with_owner_names()
        .await?;

    let views = orders
        .into_iter()
        .map(|(header, name)| AdminOrderView {
            header,
            customer_name: name.unwrap_or_else(|| "Unknown".to_owned()),
        })
        .collect();

    Ok(Json(views))
}

/// Update an order's status and/or payment status.
///
/// Status values are free text; order workflow is the store's business.
#[instrument(skip(state, _admin, request))]
pub async fn update_order(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    let updated = OrderRepository::new(state.pool())
        .update_status(
            id,
            request.status.as_deref(),
            request.payment_status.as_deref(),
        )
        .await?;

    if !updated {
        return Err(AppError::NotFound("Order not found".to_owned()));
    }

    Ok(Json(json!({ "message": "Order updated successfully" })))
}

/// Delete an order and its items.
#[instrument(skip(state, _admin))]
pub async fn delete_order(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = OrderRepository::new(state.pool()).delete_cascade(id).await?;

    if !deleted {
        return Err(AppError::NotFound("Order not found".to_owned()));
    }

    Ok(Json(json!({ "message": "Order deleted successfully" })))
}
