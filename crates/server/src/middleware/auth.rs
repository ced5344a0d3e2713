//! Authentication extractors.
//!
//! The external authentication collaborator verifies credentials and stores
//! a [`Principal`] in the session; these extractors read it back out for
//! route handlers. Handlers never touch the session directly.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{Principal, session_keys};

/// Extractor that requires an authenticated principal.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(principal): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", principal.id)
/// }
/// ```
pub struct RequireAuth(pub Principal);

/// Extractor that requires an authenticated principal with the admin role.
pub struct RequireAdmin(pub Principal);

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No principal in the session.
    Unauthenticated,
    /// Principal present but not an admin.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Admin access required" })),
            )
                .into_response(),
        }
    }
}

/// Read the principal out of the request's session, if any.
async fn principal_from_parts(parts: &mut Parts) -> Option<Principal> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<Principal>(session_keys::PRINCIPAL)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = principal_from_parts(parts)
            .await
            .ok_or(AuthRejection::Unauthenticated)?;

        crate::error::set_sentry_user(&principal.id);

        Ok(Self(principal))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(principal) = RequireAuth::from_request_parts(parts, state).await?;

        if !principal.role.is_admin() {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(principal))
    }
}

/// Helper for the auth collaborator: store the principal in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_principal(
    session: &Session,
    principal: &Principal,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::PRINCIPAL, principal).await
}

/// Helper for the auth collaborator: clear the principal (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_principal(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<Principal>(session_keys::PRINCIPAL).await?;
    Ok(())
}
