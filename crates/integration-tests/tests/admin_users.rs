//! Integration tests for the admin surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p clothy-server)
//! - Seeded session cookies in the environment (see crate docs)
//! - `CLOTHY_TEST_DISPOSABLE_USER_ID` - a user created for the cascade test
//!   (e.g. via `clothy-cli admin create-user`), destroyed by it

use reqwest::StatusCode;
use serde_json::Value;

use clothy_integration_tests::{admin_session, base_url, client_with_session, user_session};

fn disposable_user_id() -> String {
    std::env::var("CLOTHY_TEST_DISPOSABLE_USER_ID").unwrap_or_default()
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_admin_routes_reject_regular_users() {
    let client = client_with_session(&user_session());

    let resp = client
        .get(format!("{}/api/admin/users", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_admin_can_list_users_and_orders() {
    let client = client_with_session(&admin_session());
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/admin/users"))
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<Value> = resp.json().await.expect("Failed to parse users");
    // Profiles never carry credential material.
    assert!(users.iter().all(|u| u.get("password").is_none()));

    let resp = client
        .get(format!("{base}/api/admin/orders"))
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);
    let orders: Vec<Value> = resp.json().await.expect("Failed to parse orders");
    assert!(orders.iter().all(|o| o.get("customerName").is_some()));
}

// ============================================================================
// Cascade delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server, seeded sessions, and a disposable user"]
async fn test_cascade_delete_removes_user_and_owned_data() {
    let client = client_with_session(&admin_session());
    let base = base_url();
    let user_id = disposable_user_id();

    let resp = client
        .delete(format!("{base}/api/admin/users/{user_id}"))
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User deleted successfully");
    for key in ["cartItems", "addresses", "orders", "orderItems"] {
        assert!(
            body["deletedItems"][key].is_u64(),
            "deletedItems must report a {key} count"
        );
    }

    // A second delete proves the cascade took the user row with it.
    let resp = client
        .delete(format!("{base}/api/admin/users/{user_id}"))
        .send()
        .await
        .expect("Failed to send second delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_update_unknown_order_is_not_found() {
    let client = client_with_session(&admin_session());

    let resp = client
        .put(format!("{}/api/admin/orders/999999", base_url()))
        .json(&serde_json::json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
