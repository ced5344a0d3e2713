//! Order repository.
//!
//! Order assembly is a single transaction: header, items, and the cart
//! clear commit together or not at all. A crash mid-assembly can no longer
//! strand a header without items or leave the cart populated after a
//! successful order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use clothy_core::{OrderId, OrderItemId, PaymentMethod, UserId, UtrNumber};

use super::RepositoryError;
use crate::models::address::AddressSnapshot;
use crate::models::order::{OrderHeader, OrderItem};

/// Internal row type for order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    owner_id: i32,
    total_amount: Decimal,
    status: String,
    shipping_address: Option<serde_json::Value>,
    payment_method: String,
    utr_number: Option<String>,
    payment_status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for OrderHeader {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let shipping_address = row
            .shipping_address
            .map(serde_json::from_value::<AddressSnapshot>)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid address snapshot: {e}"))
            })?;

        let utr_number = row
            .utr_number
            .as_deref()
            .map(UtrNumber::parse)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid UTR in database: {e}")))?;

        Ok(Self {
            id: OrderId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            total_amount: row.total_amount,
            status: row.status,
            shipping_address,
            payment_method: PaymentMethod::from(row.payment_method),
            utr_number,
            payment_status: row.payment_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_name: row.product_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

/// Order header row joined with the owner's profile, for the admin list.
#[derive(Debug, sqlx::FromRow)]
struct OrderWithOwnerRow {
    #[sqlx(flatten)]
    order: OrderRow,
    first_name: Option<String>,
    last_name: Option<String>,
}

/// A fully assembled order, ready to persist.
///
/// Built by the checkout service; by this point validation has passed and
/// any payment-method-specific line (the COD surcharge) is already present
/// in `items`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub total_amount: Decimal,
    pub shipping_address: Option<AddressSnapshot>,
    pub payment_method: PaymentMethod,
    pub utr_number: Option<UtrNumber>,
    pub items: Vec<NewOrderItem>,
}

/// One line of a not-yet-persisted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

const ORDER_COLUMNS: &str = "id, owner_id, total_amount, status, shipping_address, \
                             payment_method, utr_number, payment_status, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an assembled order and clear the owner's cart.
    ///
    /// Inserts the header with status `pending`, bulk-inserts the items,
    /// then deletes every cart line the owner has - even lines that were
    /// not part of this order, since the cart is assumed to be the order
    /// source. All of it commits atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing
    /// is persisted in that case.
    pub async fn create(
        &self,
        owner: UserId,
        order: &NewOrder,
    ) -> Result<OrderId, RepositoryError> {
        let snapshot_json = order
            .shipping_address
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("unserializable address snapshot: {e}"))
            })?;

        let mut tx = self.pool.begin().await?;

        let (order_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO store_order (owner_id, total_amount, status, shipping_address,
                                     payment_method, utr_number)
            VALUES ($1, $2, 'pending', $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(owner)
        .bind(order.total_amount)
        .bind(snapshot_json)
        .bind(order.payment_method.as_str())
        .bind(order.utr_number.as_ref().map(UtrNumber::as_str))
        .fetch_one(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r"
                INSERT INTO order_item (order_id, product_name, unit_price, quantity)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_line WHERE owner_id = $1")
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// List an owner's order headers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_owner(&self, owner: UserId) -> Result<Vec<OrderHeader>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM store_order
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Fetch the items belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_name, unit_price, quantity
            FROM order_item
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List every order with its owner's name, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all_with_owner_names(
        &self,
    ) -> Result<Vec<(OrderHeader, Option<String>)>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderWithOwnerRow>(
            r"
            SELECT o.id, o.owner_id, o.total_amount, o.status, o.shipping_address,
                   o.payment_method, o.utr_number, o.payment_status, o.created_at, o.updated_at,
                   u.first_name, u.last_name
            FROM store_order o
            LEFT JOIN user_account u ON u.id = o.owner_id
            ORDER BY o.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let name = match (row.first_name, row.last_name) {
                    (Some(first), Some(last)) => {
                        let full = format!("{first} {last}");
                        let trimmed = full.trim();
                        (!trimmed.is_empty()).then(|| trimmed.to_owned())
                    }
                    _ => None,
                };
                Ok((row.order.try_into()?, name))
            })
            .collect()
    }

    /// Update an order's status fields (admin only).
    ///
    /// Absent fields keep their current value; `updated_at` is refreshed
    /// either way.
    ///
    /// # Returns
    ///
    /// `true` if the order exists, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: Option<&str>,
        payment_status: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE store_order
            SET status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(order_id)
        .bind(status)
        .bind(payment_status)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an order and its items (admin only).
    ///
    /// # Returns
    ///
    /// `true` if the order existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn delete_cascade(&self, order_id: OrderId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_item WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM store_order WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
