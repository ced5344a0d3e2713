//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! clothy-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CLOTHY_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use super::CommandError;

/// Run the embedded migrations against the configured database.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = clothy_server::db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
