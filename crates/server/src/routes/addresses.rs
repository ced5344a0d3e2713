//! Address route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;

use clothy_core::AddressId;

use crate::db::AddressRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Address, AddressFields};
use crate::state::AppState;

/// List the caller's addresses, default first, then newest first.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .list(principal.id)
        .await?;
    Ok(Json(addresses))
}

/// Create an address for the caller.
///
/// Marking it default clears the flag on every other address the caller has.
#[instrument(skip(state, principal, fields), fields(owner = %principal.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(fields): Json<AddressFields>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let address = AddressRepository::new(state.pool())
        .create(principal.id, &fields)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Address added successfully",
            "addressId": address.id,
        })),
    ))
}

/// Update one of the caller's addresses.
#[instrument(skip(state, principal, fields), fields(owner = %principal.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<AddressId>,
    Json(fields): Json<AddressFields>,
) -> Result<Json<serde_json::Value>> {
    let updated = AddressRepository::new(state.pool())
        .update(principal.id, id, &fields)
        .await?;

    if updated.is_none() {
        return Err(AppError::NotFound("Address not found".to_owned()));
    }

    Ok(Json(json!({ "message": "Address updated successfully" })))
}

/// Delete one of the caller's addresses.
#[instrument(skip(state, principal), fields(owner = %principal.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = AddressRepository::new(state.pool())
        .delete(principal.id, id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Address not found".to_owned()));
    }

    Ok(Json(json!({ "message": "Address deleted successfully" })))
}
