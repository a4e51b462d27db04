//! Catalog client against a live router on an ephemeral port

use axum::Router;
use chrono::{TimeZone, Utc};
use domain_events::*;
use std::sync::Arc;
use tokio::net::TcpListener;
use uuid::Uuid;

async fn spawn_catalog() -> EventCatalogClient {
    let repository = Arc::new(InMemoryEventRepository::new());
    let service = Arc::new(EventService::new(repository));
    let app = Router::new().nest("/api/event", events_router(service));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    EventCatalogClient::new(format!("http://{}", addr))
}

fn request(name: &str) -> CreateEvent {
    CreateEvent {
        id: None,
        name: name.to_string(),
        price: 75,
        artist: "Orchestra".to_string(),
        date: Utc.with_ymd_and_hms(2030, 9, 1, 19, 0, 0).unwrap(),
        description: "Season opener".to_string(),
        image_url: "https://cdn.example.com/opener.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_client_create_and_fetch() {
    let client = spawn_catalog().await;

    let created = client.create_event(&request("Season Opener")).await.unwrap();
    assert_eq!(created.name, "Season Opener");

    let fetched = client.get_event_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let all = client.get_all().await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_client_unknown_id_is_status_error() {
    let client = spawn_catalog().await;

    let err = client.get_event_by_id(Uuid::new_v4()).await.unwrap_err();
    match err {
        CatalogClientError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_empty_catalog_is_status_error() {
    let client = spawn_catalog().await;

    assert!(matches!(
        client.get_all().await,
        Err(CatalogClientError::Status { .. })
    ));
}

#[tokio::test]
async fn test_client_invalid_request_is_status_error() {
    let client = spawn_catalog().await;

    let err = client.create_event(&request("")).await.unwrap_err();
    match err {
        CatalogClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("VALIDATION_ERROR"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_unreachable_server_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EventCatalogClient::new(format!("http://{}", addr));
    assert!(matches!(
        client.get_all().await,
        Err(CatalogClientError::Http(_))
    ));
}
