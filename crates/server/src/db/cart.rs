//! Cart repository.
//!
//! The cart table is unique on (owner, product name). `add_or_increment`
//! leans on that constraint with an atomic upsert so two racing adds for the
//! same product can never produce two rows: the loser of the insert race
//! lands in the conflict arm and increments instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use clothy_core::{CartLineId, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;

/// Internal row type for cart queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    owner_id: i32,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: CartLineId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            product_name: row.product_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Upsert row: the written line plus whether it was freshly inserted.
#[derive(Debug, sqlx::FromRow)]
struct CartUpsertRow {
    #[sqlx(flatten)]
    line: CartLineRow,
    inserted: bool,
}

/// Result of an add-or-increment write.
#[derive(Debug)]
pub struct CartUpsert {
    /// The line as it now exists.
    pub line: CartLine,
    /// True when a new line was created, false when an existing line was
    /// incremented.
    pub inserted: bool,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to the owner's cart, or increment the existing line.
    ///
    /// A repeat add bumps the existing line's quantity by exactly one and
    /// refreshes `updated_at`, regardless of the `quantity` argument; the
    /// argument only sizes a freshly created line. The owner's display name
    /// is denormalized onto the line on every write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_or_increment(
        &self,
        owner: UserId,
        product_name: &str,
        unit_price: Decimal,
        quantity: i32,
        display_name: &str,
    ) -> Result<CartUpsert, RepositoryError> {
        let row = sqlx::query_as::<_, CartUpsertRow>(
            r"
            INSERT INTO cart_line (owner_id, product_name, unit_price, quantity, display_name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner_id, product_name) DO UPDATE
            SET quantity = cart_line.quantity + 1,
                display_name = EXCLUDED.display_name,
                updated_at = now()
            RETURNING id, owner_id, product_name, unit_price, quantity, display_name,
                      created_at, updated_at, (xmax = 0) AS inserted
            ",
        )
        .bind(owner)
        .bind(product_name)
        .bind(unit_price)
        .bind(quantity)
        .bind(display_name)
        .fetch_one(self.pool)
        .await?;

        Ok(CartUpsert {
            line: row.line.into(),
            inserted: row.inserted,
        })
    }

    /// List all cart lines for an owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, owner_id, product_name, unit_price, quantity, display_name,
                   created_at, updated_at
            FROM cart_line
            WHERE owner_id = $1
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a single cart line, scoped to the owner.
    ///
    /// # Returns
    ///
    /// `true` if the line was deleted, `false` if it does not exist or
    /// belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_one(
        &self,
        owner: UserId,
        line_id: CartLineId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_line
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(line_id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every cart line for an owner.
    ///
    /// # Returns
    ///
    /// The number of lines removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, owner: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_line
            WHERE owner_id = $1
            ",
        )
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
