//! Address repository.
//!
//! Enforces the single-default invariant: setting `is_default` on one
//! address clears it on every sibling of the same owner, inside one
//! transaction, so no interleaving can commit two defaults.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use clothy_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::address::{Address, AddressFields};

/// Internal row type for address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i32,
    owner_id: i32,
    kind: String,
    recipient_name: String,
    email: String,
    phone: String,
    house: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            kind: row.kind,
            recipient_name: row.recipient_name,
            email: row.email,
            phone: row.phone,
            house: row.house,
            street: row.street,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            is_default: row.is_default,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ADDRESS_COLUMNS: &str = "id, owner_id, kind, recipient_name, email, phone, house, street, \
                               city, state, zip_code, country, is_default, created_at, updated_at";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List an owner's addresses, default first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM address
            WHERE owner_id = $1
            ORDER BY is_default DESC, created_at DESC
            "
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Look up a single address, scoped to the owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_owner(
        &self,
        owner: UserId,
        id: AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM address
            WHERE id = $1 AND owner_id = $2
            "
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new address.
    ///
    /// When the new address is marked default, every sibling's flag is
    /// cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn create(
        &self,
        owner: UserId,
        fields: &AddressFields,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if fields.is_default {
            sqlx::query("UPDATE address SET is_default = FALSE WHERE owner_id = $1")
                .bind(owner)
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            INSERT INTO address (owner_id, kind, recipient_name, email, phone, house,
                                 street, city, state, zip_code, country, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(owner)
        .bind(&fields.kind)
        .bind(&fields.recipient_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.house)
        .bind(&fields.street)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.zip_code)
        .bind(&fields.country)
        .bind(fields.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update an address, scoped to the owner.
    ///
    /// The default-exclusivity sweep excludes the address being updated; it
    /// receives its flag from the update itself.
    ///
    /// # Returns
    ///
    /// The updated address, or `None` if no address with that id exists for
    /// that owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn update(
        &self,
        owner: UserId,
        id: AddressId,
        fields: &AddressFields,
    ) -> Result<Option<Address>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if fields.is_default {
            sqlx::query("UPDATE address SET is_default = FALSE WHERE owner_id = $1 AND id <> $2")
                .bind(owner)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            UPDATE address
            SET kind = $3, recipient_name = $4, email = $5, phone = $6, house = $7,
                street = $8, city = $9, state = $10, zip_code = $11, country = $12,
                is_default = $13, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(owner)
        .bind(&fields.kind)
        .bind(&fields.recipient_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.house)
        .bind(&fields.street)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.zip_code)
        .bind(&fields.country)
        .bind(fields.is_default)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(Into::into))
    }

    /// Delete an address, scoped to the owner.
    ///
    /// Deleting the default leaves the owner with no default; no sibling is
    /// promoted.
    ///
    /// # Returns
    ///
    /// `true` if the address was deleted, `false` if it does not exist or
    /// belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, owner: UserId, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM address
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
