//! API integration tests
//!
//! These run against a live server with Postgres and Redis behind it.

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

/// Helper to register a fresh account and return its token and user object
async fn signup(client: &Client, email: &str, full_name: &str) -> (String, Value) {
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "secret123",
            "full_name": full_name
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse signup response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    (token, body["user"].clone())
}

/// Helper to create a listing and return it
async fn create_item(client: &Client, token: &str, title: &str, images: Vec<&str>) -> Value {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "description": "Integration test listing",
            "category": "Tools & Equipment",
            "condition": "good",
            "images": images
        }))
        .send()
        .await
        .expect("Failed to send create item request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse item response")
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_signup_and_login() {
    let client = Client::new();
    let email = unique_email("signup");

    let (_, user) = signup(&client, &email, "Signup Tester").await;
    assert_eq!(user["email"], email.as_str());
    assert_eq!(user["full_name"], "Signup Tester");
    assert!(user["password_hash"].is_null());

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_signup_duplicate_email() {
    let client = Client::new();
    let email = unique_email("dup");

    signup(&client, &email, "First Account").await;

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "secret123",
            "full_name": "Second Account"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_duplicate_signup() {
    let client = Client::new();
    let email = unique_email("race");

    let payload = json!({
        "email": email,
        "password": "secret123",
        "full_name": "Race Tester"
    });

    // Both submissions may pass the existence check; the unique index
    // settles it. Whichever way it falls, one wins and one conflicts.
    let first = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&payload)
        .send();
    let second = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&payload)
        .send();
    let (first, second) = tokio::join!(first, second);

    let mut statuses = [
        first.expect("Failed to send signup request").status().as_u16(),
        second.expect("Failed to send signup request").status().as_u16(),
    ];
    statuses.sort();
    assert_eq!(statuses, [201, 409]);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let email = unique_email("badpass");

    signup(&client, &email, "Bad Password").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let email = unique_email("me");
    let (token, _) = signup(&client, &email, "Me Tester").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email.as_str());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/items", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_logout_revokes_token() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("logout"), "Logout Tester").await;

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send logout request");

    assert_eq!(response.status(), 204);

    // The same token must no longer open any door
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_browse_lists_available_items() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("browse"), "Browse Owner").await;

    let marker = Uuid::new_v4().to_string();
    let title = format!("Ladder {}", marker);
    create_item(&client, &token, &title, vec![]).await;

    let response = client
        .get(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let listings = body.as_array().expect("Expected an array");
    let found = listings
        .iter()
        .find(|listing| listing["title"] == title.as_str())
        .expect("Created item not in browse results");
    assert_eq!(found["owner"]["full_name"], "Browse Owner");
}

#[tokio::test]
#[ignore]
async fn test_browse_search_filter() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("search"), "Search Owner").await;

    let marker = Uuid::new_v4().to_string();
    create_item(&client, &token, &format!("Drill {}", marker), vec![]).await;
    create_item(&client, &token, &format!("Tent {}", marker), vec![]).await;

    // Substring of the first title only, in the wrong case on purpose
    let term = format!("drill {}", marker);
    let response = client
        .get(format!("{}/items", BASE_URL))
        .query(&[("search", term.as_str())])
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let listings = body.as_array().expect("Expected an array");
    assert_eq!(listings.len(), 1);
    assert!(listings[0]["title"]
        .as_str()
        .expect("title missing")
        .starts_with("Drill"));
}

#[tokio::test]
#[ignore]
async fn test_browse_hides_unavailable_items() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("hidden"), "Hidden Owner").await;

    let title = format!("Pressure Washer {}", Uuid::new_v4());
    let item = create_item(&client, &token, &title, vec![]).await;
    let item_id = item["id"].as_str().expect("No item id").to_string();

    // Fresh listings start out available and show up in browse
    let response = client
        .get(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let listings = body.as_array().expect("Expected an array");
    assert!(listings.iter().any(|listing| listing["id"] == item_id.as_str()));

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let listings = body.as_array().expect("Expected an array");
    assert!(listings.iter().all(|listing| listing["id"] != item_id.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_list_categories() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("cats"), "Category Tester").await;

    let response = client
        .get(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let categories = body.as_array().expect("Expected an array");
    assert_eq!(categories.len(), 12);
    assert!(categories.contains(&json!("Tools & Equipment")));
    assert!(categories.contains(&json!("Other")));
}

#[tokio::test]
#[ignore]
async fn test_create_item_rejects_invalid_payload() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("invalid"), "Invalid Tester").await;

    // Empty title
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "",
            "description": "No title",
            "category": "Other",
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Six images where five is the cap
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Too many pictures",
            "description": "Six images",
            "category": "Other",
            "condition": "good",
            "images": ["a", "b", "c", "d", "e", "f"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_gallery_navigation() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("gallery"), "Gallery Owner").await;

    let item = create_item(
        &client,
        &token,
        &format!("Camera {}", Uuid::new_v4()),
        vec!["front.jpg", "back.jpg", "side.jpg"],
    )
    .await;
    let item_id = item["id"].as_str().expect("No item ID");

    // First position wraps backwards to the last image
    let response = client
        .get(format!("{}/items/{}/images/0", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["url"], "front.jpg");
    assert_eq!(body["prev"], 2);
    assert_eq!(body["next"], 1);

    // Out-of-range index
    let response = client
        .get(format!("{}/items/{}/images/3", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_availability_toggle_roundtrip() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("toggle"), "Toggle Owner").await;

    let item = create_item(&client, &token, &format!("Mixer {}", Uuid::new_v4()), vec![]).await;
    let item_id = item["id"].as_str().expect("No item ID");
    assert_eq!(item["is_available"], true);

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_available": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_availability_requires_ownership() {
    let client = Client::new();
    let (owner_token, _) = signup(&client, &unique_email("owner"), "Real Owner").await;
    let (other_token, _) = signup(&client, &unique_email("other"), "Someone Else").await;

    let item = create_item(&client, &owner_token, &format!("Saw {}", Uuid::new_v4()), vec![]).await;
    let item_id = item["id"].as_str().expect("No item ID");

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_delete_item_twice() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("delete"), "Delete Owner").await;

    let item = create_item(&client, &token, &format!("Chair {}", Uuid::new_v4()), vec![]).await;
    let item_id = item["id"].as_str().expect("No item ID");

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_self_borrow_rejected() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("selfborrow"), "Self Borrower").await;

    let item = create_item(&client, &token, &format!("Bike {}", Uuid::new_v4()), vec![]).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "item_id": item["id"],
            "start_date": "2026-09-01",
            "end_date": "2026-09-05"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_request_rejects_reversed_dates() {
    let client = Client::new();
    let (owner_token, _) = signup(&client, &unique_email("dates-owner"), "Dates Owner").await;
    let (borrower_token, _) = signup(&client, &unique_email("dates-borrower"), "Dates Borrower").await;

    let item = create_item(
        &client,
        &owner_token,
        &format!("Projector {}", Uuid::new_v4()),
        vec![],
    )
    .await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .json(&json!({
            "item_id": item["id"],
            "start_date": "2026-09-05",
            "end_date": "2026-09-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_request_rejects_unavailable_item() {
    let client = Client::new();
    let (owner_token, _) = signup(&client, &unique_email("unavail-owner"), "Unavail Owner").await;
    let (borrower_token, _) =
        signup(&client, &unique_email("unavail-borrower"), "Unavail Borrower").await;

    let item = create_item(
        &client,
        &owner_token,
        &format!("Kayak {}", Uuid::new_v4()),
        vec![],
    )
    .await;
    let item_id = item["id"].as_str().expect("No item ID");

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .json(&json!({
            "item_id": item_id,
            "start_date": "2026-09-01",
            "end_date": "2026-09-05"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_borrow_flow_approve_then_reject_conflicts() {
    let client = Client::new();
    let (owner_token, _) = signup(&client, &unique_email("flow-owner"), "Flow Owner").await;
    let (borrower_token, borrower) =
        signup(&client, &unique_email("flow-borrower"), "Flow Borrower").await;

    let item = create_item(
        &client,
        &owner_token,
        &format!("Telescope {}", Uuid::new_v4()),
        vec![],
    )
    .await;

    // Borrower submits
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .json(&json!({
            "item_id": item["id"],
            "start_date": "2026-09-01",
            "end_date": "2026-09-05",
            "message": "May I borrow this for the weekend?"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(request["status"], "pending");
    let request_id = request["id"].as_str().expect("No request ID");

    // Owner sees it in the received inbox
    let response = client
        .get(format!("{}/requests", BASE_URL))
        .query(&[("role", "received")])
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let inbox = body.as_array().expect("Expected an array");
    let entry = inbox
        .iter()
        .find(|r| r["id"] == request_id)
        .expect("Request not in inbox");
    assert_eq!(entry["borrower"]["id"], borrower["id"]);
    assert_eq!(entry["item"]["title"], item["title"]);

    // Borrower sees it in the sent outbox
    let response = client
        .get(format!("{}/requests", BASE_URL))
        .query(&[("role", "sent")])
        .header("Authorization", format!("Bearer {}", borrower_token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let outbox = body.as_array().expect("Expected an array");
    assert!(outbox.iter().any(|r| r["id"] == request_id));

    // Borrower cannot decide
    let response = client
        .post(format!("{}/requests/{}/approve", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);

    // Owner approves
    let response = client
        .post(format!("{}/requests/{}/approve", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "approved");

    // A second decision is an illegal transition
    let response = client
        .post(format!("{}/requests/{}/reject", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_my_items_includes_unavailable() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("inventory"), "Inventory Owner").await;

    let item = create_item(&client, &token, &format!("Heater {}", Uuid::new_v4()), vec![]).await;
    let item_id = item["id"].as_str().expect("No item ID");

    let response = client
        .put(format!("{}/items/{}/availability", BASE_URL, item_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/my/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body.as_array().expect("Expected an array");
    let entry = items
        .iter()
        .find(|i| i["id"] == item_id)
        .expect("Hidden item missing from own inventory");
    assert_eq!(entry["is_available"], false);
}

#[tokio::test]
#[ignore]
async fn test_my_stats() {
    let client = Client::new();
    let (token, _) = signup(&client, &unique_email("stats"), "Stats Owner").await;

    create_item(&client, &token, &format!("Grill {}", Uuid::new_v4()), vec![]).await;

    let response = client
        .get(format!("{}/my/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["items"]["total"], 1);
    assert_eq!(body["items"]["available"], 1);
    assert_eq!(body["items"]["unavailable"], 0);
    assert_eq!(body["requests_received"]["total"], 0);
    assert_eq!(body["requests_sent"]["total"], 0);
}

#[tokio::test]
#[ignore]
async fn test_public_profile_hides_contact_details() {
    let client = Client::new();
    let (token, user) = signup(&client, &unique_email("profile"), "Profile Tester").await;
    let user_id = user["id"].as_str().expect("No user ID");

    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["full_name"], "Profile Tester");
    assert_eq!(body["rating"], 5.0);
    assert!(body.get("email").is_none());
    assert!(body.get("phone").is_none());
    assert!(body.get("password_hash").is_none());
}
