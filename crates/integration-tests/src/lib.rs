//! Integration tests for Clothy.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! docker compose up -d postgres
//! cargo run -p clothy-cli -- migrate
//!
//! # Start the server
//! cargo run -p clothy-server
//!
//! # Seed sessions and run the ignored tests
//! cargo test -p clothy-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! Authentication is owned by an external collaborator, so tests expect
//! pre-seeded session cookies:
//!
//! - `CLOTHY_BASE_URL` - server base URL (default `http://localhost:3000`)
//! - `CLOTHY_TEST_SESSION` - session cookie value for a regular user
//! - `CLOTHY_TEST_ADMIN_SESSION` - session cookie value for an admin
//! - `CLOTHY_TEST_USER_ID` - the regular user's id (for cascade assertions)

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CLOTHY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Session cookie value for the seeded regular user.
#[must_use]
pub fn user_session() -> String {
    std::env::var("CLOTHY_TEST_SESSION").unwrap_or_default()
}

/// Session cookie value for the seeded admin.
#[must_use]
pub fn admin_session() -> String {
    std::env::var("CLOTHY_TEST_ADMIN_SESSION").unwrap_or_default()
}

/// Build a client that sends the given session cookie on every request.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client_with_session(session: &str) -> reqwest::Client {
    use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    let cookie = format!("clothy_session={session}");
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&cookie).expect("valid cookie header"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}
