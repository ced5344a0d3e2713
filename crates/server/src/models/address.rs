//! Shipping address domain and wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clothy_core::{AddressId, UserId};

/// Country recorded on a snapshot when the address left the field blank.
const DEFAULT_COUNTRY: &str = "IN";

/// A stored shipping address.
///
/// At most one address per owner has `is_default = true`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub owner_id: UserId,
    /// Free-form label such as "home" or "work".
    pub kind: String,
    pub recipient_name: String,
    pub email: String,
    pub phone: String,
    pub house: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or updating an address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFields {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub house: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Denormalized copy of an address taken at order time.
///
/// Orders keep this copy instead of a reference so that later edits or
/// deletes of the address never alter order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSnapshot {
    pub recipient_name: String,
    pub email: String,
    pub phone: String,
    pub house: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<&Address> for AddressSnapshot {
    fn from(address: &Address) -> Self {
        Self {
            recipient_name: address.recipient_name.clone(),
            email: address.email.clone(),
            phone: address.phone.clone(),
            house: address.house.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: if address.country.is_empty() {
                DEFAULT_COUNTRY.to_owned()
            } else {
                address.country.clone()
            },
        }
    }
}
