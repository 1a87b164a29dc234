//! API integration tests
//!
//! These run against a live server (`cargo run`) with a seeded manager
//! account (manager@gymdesk.org / admin123) and at least one trainer
//! (id 1) in the database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const SEED_TRAINER_ID: i64 = 1;

/// Helper to get a manager token
async fn manager_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "kind": "manager",
            "email": "manager@gymdesk.org",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a throwaway customer and log it in
async fn register_customer(client: &Client, tag: &str) -> (String, i64) {
    let email = format!("it-{}-{}@example.com", tag, chrono_millis());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": format!("Test {}", tag),
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to register customer");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse registration");
    let id = body["id"].as_i64().expect("No customer id");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "kind": "customer",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to log customer in");
    let body: Value = response.json().await.expect("Failed to parse login");
    (body["token"].as_str().expect("No token").to_string(), id)
}

/// Create a fresh assignment via the staff API
async fn create_assignment(
    client: &Client,
    token: &str,
    start: &str,
    end: &str,
    max_capacity: i64,
) -> i64 {
    // Every assignment needs a service to hang off
    let response = client
        .post(format!("{}/services", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("it-service-{}", chrono_millis()) }))
        .send()
        .await
        .expect("Failed to create service");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse service");
    let service_id = body["service_id"].as_i64().expect("No service id");

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "service_id": service_id,
            "trainer_id": SEED_TRAINER_ID,
            "start_time": start,
            "end_time": end,
            "schedule": ["Monday"],
            "max_capacity": max_capacity,
            "rate": 50
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse assignment");
    body["assign_id"].as_i64().expect("No assignment id")
}

async fn submit_booking(client: &Client, token: &str, customer_id: i64, assign_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "trainer_id": SEED_TRAINER_ID,
            "assign_id": assign_id
        }))
        .send()
        .await
        .expect("Failed to submit booking")
}

async fn assignment_capacity(client: &Client, token: &str, assign_id: i64) -> i64 {
    let response = client
        .get(format!("{}/assignments/{}", BASE_URL, assign_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch assignment");
    let body: Value = response.json().await.expect("Failed to parse assignment");
    body["current_capacity"].as_i64().expect("No capacity")
}

fn chrono_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "kind": "manager",
            "email": "manager@gymdesk.org",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/assignments", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_booking_round_trip_reuses_row_and_restores_capacity() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (customer_token, customer_id) = register_customer(&client, "roundtrip").await;

    let assign_id = create_assignment(&client, &staff, "09:00", "10:00", 2).await;

    // Submit
    let response = submit_booking(&client, &customer_token, customer_id, assign_id).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let booking_id = body["booking_id"].as_i64().unwrap();
    assert_eq!(body["kind"], "created");
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);

    // Confirm (status-only, no capacity effect)
    let response = client
        .put(format!("{}/bookings/confirm", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({ "booking_ids": [booking_id] }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);

    // Cancel releases the seat
    let response = client
        .put(format!("{}/bookings/cancel", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({ "booking_ids": [booking_id] }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 0);

    // Re-submit reuses the same row
    let response = submit_booking(&client, &customer_token, customer_id, assign_id).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["booking_id"].as_i64().unwrap(), booking_id);
    assert_eq!(body["kind"], "reactivated");
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_submit_is_rejected() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (customer_token, customer_id) = register_customer(&client, "dup").await;

    let assign_id = create_assignment(&client, &staff, "10:00", "11:00", 5).await;

    let response = submit_booking(&client, &customer_token, customer_id, assign_id).await;
    assert_eq!(response.status(), 201);

    let response = submit_booking(&client, &customer_token, customer_id, assign_id).await;
    assert_eq!(response.status(), 409);

    // Capacity unchanged by the rejected submit
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_window_is_rejected_touching_is_not() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (customer_token, customer_id) = register_customer(&client, "overlap").await;

    let first = create_assignment(&client, &staff, "10:00", "11:00", 5).await;
    let overlapping = create_assignment(&client, &staff, "10:30", "11:30", 5).await;
    let touching = create_assignment(&client, &staff, "11:00", "12:00", 5).await;

    let response = submit_booking(&client, &customer_token, customer_id, first).await;
    assert_eq!(response.status(), 201);

    let response = submit_booking(&client, &customer_token, customer_id, overlapping).await;
    assert_eq!(response.status(), 409);

    // Half-open windows: 11:00 end against 11:00 start does not conflict
    let response = submit_booking(&client, &customer_token, customer_id, touching).await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_capacity_ceiling_holds() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (token_a, customer_a) = register_customer(&client, "cap-a").await;
    let (token_b, customer_b) = register_customer(&client, "cap-b").await;

    let assign_id = create_assignment(&client, &staff, "14:00", "15:00", 1).await;

    let response = submit_booking(&client, &token_a, customer_a, assign_id).await;
    assert_eq!(response.status(), 201);

    let response = submit_booking(&client, &token_b, customer_b, assign_id).await;
    assert_eq!(response.status(), 409);

    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_cancellation_is_idempotent() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (customer_token, customer_id) = register_customer(&client, "idem").await;

    let assign_id = create_assignment(&client, &staff, "16:00", "17:00", 3).await;

    let response = submit_booking(&client, &customer_token, customer_id, assign_id).await;
    let body: Value = response.json().await.unwrap();
    let booking_id = body["booking_id"].as_i64().unwrap();

    for expected_capacity in [0, 0] {
        let response = client
            .put(format!("{}/bookings/cancel", BASE_URL))
            .header("Authorization", format!("Bearer {}", staff))
            .json(&json!({ "booking_ids": [booking_id] }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        // Second cancel must not decrement again
        assert_eq!(assignment_capacity(&client, &staff, assign_id).await, expected_capacity);
    }
}

#[tokio::test]
#[ignore]
async fn test_racing_cancels_release_the_seat_once() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (token_a, customer_a) = register_customer(&client, "race-a").await;
    let (token_b, customer_b) = register_customer(&client, "race-b").await;

    let assign_id = create_assignment(&client, &staff, "07:00", "08:00", 3).await;

    let response = submit_booking(&client, &token_a, customer_a, assign_id).await;
    let body: Value = response.json().await.unwrap();
    let booking_a = body["booking_id"].as_i64().unwrap();

    // Second active booking keeps the counter observable after the race
    let response = submit_booking(&client, &token_b, customer_b, assign_id).await;
    assert_eq!(response.status(), 201);
    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 2);

    // A staff batch and the owner's own cancel race on the same booking;
    // only the one whose status flip lands may decrement
    let staff_cancel = client
        .put(format!("{}/bookings/cancel", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({ "booking_ids": [booking_a] }))
        .send();
    let own_cancel = client
        .put(format!("{}/bookings/{}/cancel", BASE_URL, booking_a))
        .header("Authorization", format!("Bearer {}", token_a))
        .send();
    let (staff_response, own_response) = tokio::join!(staff_cancel, own_cancel);
    assert!(staff_response.unwrap().status().is_success());
    assert!(own_response.unwrap().status().is_success());

    assert_eq!(assignment_capacity(&client, &staff, assign_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_customer_cannot_book_for_someone_else() {
    let client = Client::new();
    let staff = manager_token(&client).await;
    let (token_a, _customer_a) = register_customer(&client, "auth-a").await;
    let (_token_b, customer_b) = register_customer(&client, "auth-b").await;

    let assign_id = create_assignment(&client, &staff, "08:00", "09:00", 3).await;

    let response = submit_booking(&client, &token_a, customer_b, assign_id).await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_booking_stats() {
    let client = Client::new();
    let staff = manager_token(&client).await;

    let response = client
        .get(format!("{}/stats/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["bookings"]["total"].is_number());
    assert!(body["by_trainer"].is_array());
}
