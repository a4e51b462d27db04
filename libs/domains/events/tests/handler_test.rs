//! Handler tests for the event catalog
//!
//! The events router is mounted at `/event` over the in-memory backend, the
//! same way the binary mounts it under `/api`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let repository = Arc::new(InMemoryEventRepository::new());
    let service = Arc::new(EventService::new(repository));
    Router::new().nest("/event", events_router(service))
}

fn post_event(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/event")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_then_fetch_event() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("create_then_fetch");

    let response = app
        .clone()
        .oneshot(post_event(json!({
            "name": "Concert A",
            "price": builder.price(0),
            "artist": "The Kinks Revival",
            "date": builder.date(0),
            "description": "Live",
            "imageUrl": "https://cdn.example.com/a.jpg"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let created: Event = json_body(response.into_body()).await;
    assert!(!created.id.is_nil());
    assert_eq!(location, format!("/event/{}", created.id));

    let response = app
        .oneshot(get(&format!("/event/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Event = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Concert A");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_event_returns_404() {
    let response = app()
        .oneshot(get(&format!("/event/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_on_empty_store_returns_404() {
    let response = app().oneshot(get("/event")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_created_events() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("list_created");

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(post_event(json!({
                "name": builder.name("event", &i.to_string()),
                "price": builder.price(i),
                "date": builder.date(i)
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/event")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events: Vec<Event> = json_body(response.into_body()).await;
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_duplicate_client_id_second_create_fails() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("duplicate_client_id");
    let id = builder.event_id(0);

    let body = json!({
        "eventId": id,
        "name": "Concert A",
        "price": 50,
        "date": builder.date(0)
    });

    let first = app.clone().oneshot(post_event(body.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(post_event(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: serde_json::Value = json_body(second.into_body()).await;
    assert_eq!(error["message"], "An internal server error occurred");

    // The first record is untouched
    let response = app.oneshot(get(&format!("/event/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_with_empty_name_returns_400() {
    let response = app()
        .oneshot(post_event(json!({
            "name": "",
            "price": 10,
            "date": "2030-01-01T00:00:00Z"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert!(error["details"]["name"].is_array());
}

#[tokio::test]
async fn test_get_with_malformed_id_returns_400() {
    let response = app().oneshot(get("/event/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_name_only_then_fetch() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_event(json!({ "name": "Concert A" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Event = json_body(response.into_body()).await;
    assert_eq!(created.price, 0);

    let response = app
        .oneshot(get(&format!("/event/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Event = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Concert A");
}

#[tokio::test]
async fn test_create_without_name_returns_400() {
    let response = app()
        .oneshot(post_event(json!({ "price": 10 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_with_string_price_returns_400() {
    let response = app()
        .oneshot(post_event(json!({ "name": "Concert A", "price": "fifty" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_without_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/event")
        .body(Body::from(r#"{"name":"Concert A"}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_blank_name_returns_400() {
    let response = app()
        .oneshot(post_event(json!({ "name": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert_eq!(error["details"]["name"][0]["code"], "blank");
}

#[tokio::test]
async fn test_list_on_empty_store_stays_404_after_rejected_create() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_event(json!({ "name": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/event")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
