//! Order route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::order::{CheckoutRequest, OrderView};
use crate::services::checkout;
use crate::state::AppState;

/// The caller's order history, newest first, with nested items.
///
/// Per-item totals are computed here for display; they are never stored.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<Json<Vec<OrderView>>> {
    let repo = OrderRepository::new(state.pool());
    let headers = repo.list_for_owner(principal.id).await?;

    let mut views = Vec::with_capacity(headers.len());
    for header in headers {
        let items = repo.items_for(header.id).await?;
        views.push(OrderView {
            header,
            items: items.into_iter().map(Into::into).collect(),
        });
    }

    Ok(Json(views))
}

/// Place an order from the submitted checkout payload.
#[instrument(skip(state, principal, request), fields(owner = %principal.id))]
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let order_id = checkout::place_order(&state, principal.id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order created successfully",
            "orderId": order_id,
        })),
    ))
}
