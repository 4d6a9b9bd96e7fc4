//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api/v1";

/// Unique suffix so repeated runs do not collide on usernames and emails
fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}{}", prefix, nanos)
}

/// Register an account and return (user_id, token)
async fn register_and_login(client: &Client, role: &str) -> (i64, String) {
    let username = unique(role);
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "secret123",
            "role": role
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    assert_eq!(body["token_type"], "bearer");
    (
        body["user_id"].as_i64().expect("No user_id in response"),
        body["access_token"].as_str().expect("No token in response").to_string(),
    )
}

async fn create_tool(client: &Client, admin_token: &str, name: &str) -> Value {
    let response = client
        .post(format!("{}/tools", BASE_URL))
        .bearer_auth(admin_token)
        .json(&json!({ "name": name, "category": "Hand Tools", "condition": "good" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
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
async fn test_duplicate_email_is_rejected() {
    let client = Client::new();
    let username = unique("dup");
    let email = format!("{}@example.com", username);

    let first = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": username, "email": email, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": unique("other"), "email": email, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 400);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": unique("ghost"), "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Incorrect username or password");
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_create_tool() {
    let client = Client::new();
    let (_, token) = register_and_login(&client, "user").await;

    let response = client
        .post(format!("{}/tools", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Sneaky Saw" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_reserving_unavailable_tool_fails() {
    let client = Client::new();
    let (_, admin) = register_and_login(&client, "admin").await;
    let (_, member) = register_and_login(&client, "user").await;
    let tool = create_tool(&client, &admin, &unique("Ladder")).await;

    let first = client
        .post(format!("{}/reservations", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({ "tool_id": tool["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/reservations", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({ "tool_id": tool["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 400);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Tool is not available");
}

#[tokio::test]
#[ignore]
async fn test_full_lending_cycle_restores_availability() {
    let client = Client::new();
    let (_, admin) = register_and_login(&client, "admin").await;
    let (member_id, member) = register_and_login(&client, "user").await;
    let tool = create_tool(&client, &admin, &unique("Drill")).await;
    let tool_id = tool["id"].as_i64().unwrap();

    let reservation: Value = client
        .post(format!("{}/reservations", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({ "tool_id": tool_id }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(reservation["user_id"].as_i64(), Some(member_id));
    let reservation_id = reservation["id"].as_i64().unwrap();

    let checkout = client
        .post(format!("{}/reservations/{}/checkout", BASE_URL, reservation_id))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request");
    assert!(checkout.status().is_success());

    let returned = client
        .post(format!("{}/reservations/{}/return", BASE_URL, reservation_id))
        .bearer_auth(&member)
        .json(&json!({ "condition": "fair", "feedback": "Works fine" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(returned.status().is_success());

    let again = client
        .post(format!("{}/reservations/{}/return", BASE_URL, reservation_id))
        .bearer_auth(&member)
        .json(&json!({ "condition": "fair" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(again.status(), 400);

    let tool: Value = client
        .get(format!("{}/tools/{}", BASE_URL, tool_id))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(tool["is_available"], true);
    assert_eq!(tool["condition"], "fair");
}

#[tokio::test]
#[ignore]
async fn test_submission_approval_creates_tool() {
    let client = Client::new();
    let (_, admin) = register_and_login(&client, "admin").await;
    let (member_id, member) = register_and_login(&client, "user").await;
    let name = unique("Tile Cutter");

    let submission: Value = client
        .post(format!("{}/tool-submissions", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({ "name": name, "category": "Hand Tools", "condition": "good" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(submission["status"], "pending");

    let approved = client
        .put(format!("{}/tool-submissions/{}/approve", BASE_URL, submission["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert!(approved.status().is_success());

    let body: Value = approved.json().await.expect("Failed to parse response");
    assert_eq!(body["submission"]["status"], "approved");
    assert_eq!(body["tool"]["owner_id"].as_i64(), Some(member_id));
    assert_eq!(body["tool"]["is_available"], true);
    assert_eq!(body["tool"]["name"], name.as_str());
    assert_eq!(body["tool"]["category"], "Hand Tools");
    assert_eq!(body["tool"]["condition"], "good");
    assert_eq!(body["submission"]["tool_id"], body["tool"]["id"]);

    let tool: Value = client
        .get(format!("{}/tools/{}", BASE_URL, body["tool"]["id"]))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(tool["owner_id"].as_i64(), Some(member_id));

    let rejected_twice = client
        .put(format!("{}/tool-submissions/{}/reject", BASE_URL, submission["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(rejected_twice.status(), 400);
}
