//! Admin profile management command.

use clothy_core::Role;
use clothy_server::db::ProfileRepository;

use super::CommandError;

/// Create a profile row with the admin role.
///
/// The authentication collaborator owns credentials; this only seeds the
/// profile directory so the new admin has an identity to attach to.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or the insert fails
/// (for example, when the email is already taken).
pub async fn create_user(
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), CommandError> {
    let database_url = super::database_url()?;
    let pool = clothy_server::db::create_pool(&database_url).await?;

    let profile = ProfileRepository::new(&pool)
        .create(first_name, last_name, email, "", Role::Admin)
        .await?;

    tracing::info!(id = %profile.id, email = %profile.email, "admin profile created");
    Ok(())
}
