//! The authenticated principal.
//!
//! Authentication itself (credential verification, token issuance) lives in
//! an external collaborator. By the time a request reaches this core, that
//! collaborator has deposited a `Principal` in the session; the extractors in
//! `middleware::auth` read it back out.

use serde::{Deserialize, Serialize};

use clothy_core::{Role, UserId};

/// Session storage keys.
///
/// Namespaced to avoid collisions with anything else sharing the session.
pub mod session_keys {
    /// Key under which the authenticated principal is stored.
    pub const PRINCIPAL: &str = "clothy.principal";
}

/// An authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque identity supplied by the authentication collaborator.
    pub id: UserId,
    /// Role gates admin routes.
    pub role: Role,
}

impl Principal {
    /// Create a principal for a regular user.
    #[must_use]
    pub const fn user(id: UserId) -> Self {
        Self {
            id,
            role: Role::User,
        }
    }

    /// Create a principal for an administrator.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }
}
