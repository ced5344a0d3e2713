//! Integration tests for address management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p clothy-server)
//! - Seeded session cookies in the environment (see crate docs)

use reqwest::StatusCode;
use serde_json::{Value, json};

use clothy_integration_tests::{base_url, client_with_session, user_session};

fn address_payload(city: &str, is_default: bool) -> Value {
    json!({
        "kind": "home",
        "recipientName": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "9876543210",
        "house": "12",
        "street": "Analytical Row",
        "city": city,
        "state": "MH",
        "zipCode": "411001",
        "country": "IN",
        "isDefault": is_default,
    })
}

async fn create_address(client: &reqwest::Client, payload: &Value) -> i64 {
    let resp = client
        .post(format!("{}/api/user/addresses", base_url()))
        .json(payload)
        .send()
        .await
        .expect("Failed to create address");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    body["addressId"].as_i64().expect("addressId in response")
}

// ============================================================================
// Default exclusivity
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_at_most_one_default_address() {
    let client = client_with_session(&user_session());
    let base = base_url();

    let first = create_address(&client, &address_payload("Pune", true)).await;
    let second = create_address(&client, &address_payload("Mumbai", true)).await;

    let resp = client
        .get(format!("{base}/api/user/addresses"))
        .send()
        .await
        .expect("Failed to list addresses");
    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse list");

    let defaults: Vec<_> = addresses
        .iter()
        .filter(|a| a["isDefault"] == true)
        .collect();
    assert_eq!(defaults.len(), 1, "exactly one default may survive");
    assert_eq!(defaults[0]["id"].as_i64(), Some(second));

    // The default sorts first.
    assert_eq!(addresses[0]["id"].as_i64(), Some(second));

    // Cleanup.
    for id in [first, second] {
        client
            .delete(format!("{base}/api/user/addresses/{id}"))
            .send()
            .await
            .expect("Failed to delete address");
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_update_unknown_address_is_not_found() {
    let client = client_with_session(&user_session());

    let resp = client
        .put(format!("{}/api/user/addresses/999999", base_url()))
        .json(&address_payload("Pune", false))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded session cookies"]
async fn test_deleting_default_leaves_no_default() {
    let client = client_with_session(&user_session());
    let base = base_url();

    let id = create_address(&client, &address_payload("Pune", true)).await;

    let resp = client
        .delete(format!("{base}/api/user/addresses/{id}"))
        .send()
        .await
        .expect("Failed to delete address");
    assert_eq!(resp.status(), StatusCode::OK);

    let addresses: Vec<Value> = client
        .get(format!("{base}/api/user/addresses"))
        .send()
        .await
        .expect("Failed to list addresses")
        .json()
        .await
        .expect("Failed to parse list");

    // No sibling gets promoted; zero defaults is a valid state.
    assert!(addresses.iter().all(|a| a["isDefault"] != true));
}
