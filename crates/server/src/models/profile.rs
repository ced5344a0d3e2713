//! User profile directory entries.
//!
//! Profiles carry the displayable identity of a principal (names, email,
//! phone, role). Credentials are not stored here - password hashing and
//! token issuance belong to the authentication collaborator.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clothy_core::{Role, UserId};

/// A user profile row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Human-readable display name for this profile.
    ///
    /// First and last name joined, falling back to the email address, then
    /// to a fixed placeholder when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if !trimmed.is_empty() {
            return trimmed.to_owned();
        }
        if !self.email.is_empty() {
            return self.email.clone();
        }
        "Unknown".to_owned()
    }
}

/// How many rows of each kind an admin cascade delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCounts {
    pub cart_items: u64,
    pub addresses: u64,
    pub orders: u64,
    pub order_items: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: &str, last: &str, email: &str) -> Profile {
        Profile {
            id: UserId::new(1),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: email.to_owned(),
            phone: String::new(),
            role: Role::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_joins_names() {
        assert_eq!(
            profile("Ada", "Lovelace", "ada@example.com").display_name(),
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_display_name_handles_partial_names() {
        assert_eq!(profile("Ada", "", "ada@example.com").display_name(), "Ada");
        assert_eq!(
            profile("", "Lovelace", "ada@example.com").display_name(),
            "Lovelace"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(
            profile("", "", "ada@example.com").display_name(),
            "ada@example.com"
        );
    }

    #[test]
    fn test_display_name_last_resort_placeholder() {
        assert_eq!(profile("", "", "").display_name(), "Unknown");
    }
}
