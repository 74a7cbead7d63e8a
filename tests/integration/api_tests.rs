//! Smoke tests against a running server
//!
//! Start the server, then run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Random five-group ISBN so reruns never collide
fn generate_isbn() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!(
        "{}-{}-{}-{}-{}",
        100 + nanos % 900,
        nanos % 9,
        10000 + nanos % 90000,
        100 + (nanos / 7) % 900,
        (nanos / 11) % 9
    )
}

fn api_key() -> Option<String> {
    std::env::var("LIBRARY_API_KEY").ok()
}

fn with_key(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match api_key() {
        Some(key) => request.header("Authorization", key),
        None => request,
    }
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
async fn test_create_get_and_delete_book() {
    let client = Client::new();
    let isbn = generate_isbn();
    let book = json!({
        "isbn": isbn,
        "title": "The Dirty Coder",
        "author": "Pablo Company",
        "shortDescription": "Cool and dirty",
        "pageCount": 69,
        "releaseDate": "2024-01-01T00:00:00"
    });

    let response = with_key(client.post(format!("{}/books", BASE_URL)))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
        .to_string();
    assert_eq!(location, format!("/books/{}", isbn));

    let response = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, book);

    let response = with_key(client.delete(format!("{}{}", BASE_URL, location)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_openapi_document() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api-docs/openapi.json", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["paths"]["/books/{isbn}"].is_object());
}
