//! API integration tests
//!
//! These run against a live server backed by PostgreSQL:
//! `cargo run` in one shell, then `cargo test -- --ignored`.

use std::collections::HashSet;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use serial_test::serial;

const BASE_URL: &str = "http://localhost:8080/api";

/// Unique suffix so repeated runs don't trip the book name constraint
fn unique(label: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", label, nanos)
}

async fn create_library(client: &Client, nombre: &str) -> i64 {
    let response = client
        .post(format!("{}/biblioteca", BASE_URL))
        .json(&json!({ "nombre": nombre }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No library ID")
}

async fn create_book(client: &Client, nombre: &str, biblioteca_id: i64) -> i64 {
    let response = client
        .post(format!("{}/libros", BASE_URL))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": biblioteca_id } }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn get_status(client: &Client, path: &str) -> StatusCode {
    client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

#[tokio::test]
#[serial]
#[ignore] // Run with: cargo test -- --ignored
async fn test_create_and_get_library() {
    let client = Client::new();
    let nombre = unique("Central");

    let response = client
        .post(format!("{}/biblioteca", BASE_URL))
        .json(&json!({ "nombre": nombre }))
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
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No library ID");
    assert!(location.ends_with(&format!("/api/biblioteca/{}", id)));
    assert_eq!(body["libros"], json!([]));

    let body: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["nombre"], nombre.as_str());
    assert_eq!(body["libros"], json!([]));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_unknown_library_is_unprocessable() {
    let client = Client::new();

    assert_eq!(get_status(&client, "/biblioteca/9223372036854775807").await, 422);

    let response = client
        .put(format!("{}/biblioteca/9223372036854775807", BASE_URL))
        .json(&json!({ "nombre": "x" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let response = client
        .delete(format!("{}/biblioteca/9223372036854775807", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_update_library_keeps_id() {
    let client = Client::new();
    let id = create_library(&client, &unique("Old")).await;
    let renamed = unique("New");

    let response = client
        .put(format!("{}/biblioteca/{}", BASE_URL, id))
        .json(&json!({ "id": 0, "nombre": renamed, "libros": [] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["id"], id);
    assert_eq!(body["nombre"], renamed.as_str());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_book_never_exposes_library() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Owner")).await;
    let nombre = unique("Rayuela");

    let response = client
        .post(format!("{}/libros", BASE_URL))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": library_id } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert!(created.get("biblioteca").is_none());
    let book_id = created["id"].as_i64().expect("No book ID");

    let fetched: Value = client
        .get(format!("{}/libros/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched, json!({ "id": book_id, "nombre": nombre }));

    let library: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(library["libros"], json!([{ "id": book_id, "nombre": nombre }]));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_create_book_in_unknown_library_writes_nothing() {
    let client = Client::new();
    let nombre = unique("Orphan");

    let response = client
        .post(format!("{}/libros", BASE_URL))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": 9223372036854775807i64 } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // The name is still free, so nothing was written
    let library_id = create_library(&client, &unique("Home")).await;
    create_book(&client, &nombre, library_id).await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_update_unknown_book_leaves_storage_unchanged() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Shelf")).await;
    let nombre = unique("Ghost");

    let response = client
        .put(format!("{}/libros/9223372036854775807", BASE_URL))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": library_id } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let library: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(library["libros"], json!([]));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_move_book_between_libraries() {
    let client = Client::new();
    let from = create_library(&client, &unique("From")).await;
    let to = create_library(&client, &unique("To")).await;
    let book_id = create_book(&client, &unique("Traveller"), from).await;
    let renamed = unique("Arrived");

    let response = client
        .put(format!("{}/libros/{}", BASE_URL, book_id))
        .json(&json!({ "nombre": renamed, "biblioteca": { "id": to } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let source: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, from))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(source["libros"], json!([]));

    let target: Value = client
        .get(format!("{}/biblioteca/{}", BASE_URL, to))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(target["libros"], json!([{ "id": book_id, "nombre": renamed }]));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_duplicate_book_name_is_conflict() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Dupes")).await;
    let nombre = unique("Twice");
    create_book(&client, &nombre, library_id).await;

    let response = client
        .post(format!("{}/libros", BASE_URL))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": library_id } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let other = create_book(&client, &unique("Other"), library_id).await;
    let response = client
        .put(format!("{}/libros/{}", BASE_URL, other))
        .json(&json!({ "nombre": nombre, "biblioteca": { "id": library_id } }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_delete_library_cascades_to_books() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Doomed")).await;
    let first = create_book(&client, &unique("First"), library_id).await;
    let second = create_book(&client, &unique("Second"), library_id).await;

    let response = client
        .delete(format!("{}/biblioteca/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get_status(&client, &format!("/biblioteca/{}", library_id)).await, 422);
    assert_eq!(get_status(&client, &format!("/libros/{}", first)).await, 422);
    assert_eq!(get_status(&client, &format!("/libros/{}", second)).await, 422);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Keep")).await;
    let book_id = create_book(&client, &unique("Gone"), library_id).await;

    let response = client
        .delete(format!("{}/libros/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .delete(format!("{}/libros/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // The library survives
    assert_eq!(get_status(&client, &format!("/biblioteca/{}", library_id)).await, 200);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_pages_partition_books() {
    let client = Client::new();
    let library_id = create_library(&client, &unique("Paged")).await;
    for i in 0..5 {
        create_book(&client, &unique(&format!("Paged{}", i)), library_id).await;
    }

    let size = 2;
    let first: Value = client
        .get(format!("{}/libros?page=0&size={}", BASE_URL, size))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let total_pages = first["totalPages"].as_i64().expect("No totalPages");
    let total = first["totalElements"].as_i64().expect("No totalElements");
    assert!(first["first"].as_bool().unwrap());

    let mut seen = HashSet::new();
    let mut count = 0;
    for page in 0..total_pages {
        let body: Value = client
            .get(format!("{}/libros?page={}&size={}", BASE_URL, page, size))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        let content = body["content"].as_array().expect("No content");
        assert!(content.len() <= size);
        for book in content {
            assert!(book.get("biblioteca").is_none());
            seen.insert(book["id"].as_i64().expect("No book ID"));
            count += 1;
        }
    }

    assert_eq!(count, total);
    assert_eq!(seen.len() as i64, total);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_list_libraries_sorted_by_name() {
    let client = Client::new();
    create_library(&client, &unique("Sorted")).await;

    let response = client
        .get(format!("{}/biblioteca?sort=nombre,desc&size=50", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["content"].as_array().expect("No content").is_empty());
    assert_eq!(body["size"], 50);
    assert_eq!(body["number"], 0);
}
