//! Profile directory repository.
//!
//! Also home to the admin cascade delete: removing a user takes every entity
//! the user exclusively owns with it. The schema has no foreign keys, so the
//! ordering (items before headers, both before the profile row) is
//! referential hygiene handled here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use clothy_core::{Role, UserId};

use super::RepositoryError;
use crate::models::profile::{DeletedCounts, Profile};

/// Internal row type for profile queries.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROFILE_COLUMNS: &str =
    "id, first_name, last_name, email, phone, role, created_at, updated_at";

/// Repository for profile directory operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is invalid.
    pub async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM user_account
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List every profile, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored role is invalid.
    pub async fn list_all(&self) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM user_account
            ORDER BY created_at DESC
            "
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a new profile row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including
    /// unique violations on email).
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        role: Role,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r"
            INSERT INTO user_account (first_name, last_name, email, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROFILE_COLUMNS}
            "
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Delete a user together with everything the user owns.
    ///
    /// Removes, in order: cart lines, addresses, order items, order headers,
    /// then the profile row itself, all in one transaction.
    ///
    /// # Returns
    ///
    /// The per-set deletion counts, or `None` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn cascade_delete(
        &self,
        id: UserId,
    ) -> Result<Option<DeletedCounts>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart_items = sqlx::query("DELETE FROM cart_line WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let addresses = sqlx::query("DELETE FROM address WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let order_items = sqlx::query(
            r"
            DELETE FROM order_item
            WHERE order_id IN (SELECT id FROM store_order WHERE owner_id = $1)
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let orders = sqlx::query("DELETE FROM store_order WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted_user = sqlx::query("DELETE FROM user_account WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted_user == 0 {
            // Unknown user: roll everything back and report not-found.
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(DeletedCounts {
            cart_items,
            addresses,
            orders,
            order_items,
        }))
    }
}
