//! Socket-level test: serves the app on an ephemeral port and queries it
//! with an HTTP client.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;

use campus_hub::app_state::AppState;
use campus_hub::build_app;
use campus_hub::domain::{AssociationRef, Event, EventStatus, NearbySettings};
use campus_hub::persistence::{EventStore, InMemoryEventStore};
use campus_hub::service::EventService;

#[tokio::test]
async fn serves_nearby_events_over_http() {
    let association = AssociationRef {
        id: uuid::Uuid::new_v4(),
        name: "Hiking Club".to_string(),
    };
    let event = Event::new(
        "Sunrise walk",
        association,
        Utc::now() + ChronoDuration::days(1),
        EventStatus::Published,
    )
    .at(45.7640, 4.8357);
    let store: Arc<dyn EventStore> = Arc::new(InMemoryEventStore::with_events(vec![event]));
    let service = EventService::new(store, NearbySettings::default(), Duration::from_secs(5));
    let app = build_app(
        AppState {
            event_service: Arc::new(service),
        },
        Duration::from_secs(15),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("bind failed: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("no local addr: {e}"));
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let url = format!("http://{addr}/api/v1/events/nearby?latitude=45.76&longitude=4.83&radius=5");
    let response = reqwest::get(&url)
        .await
        .unwrap_or_else(|e| panic!("request failed: {e}"));
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response
        .json()
        .await
        .unwrap_or_else(|e| panic!("invalid json: {e}"));
    assert_eq!(body["count"], 1);
    assert_eq!(body["events"][0]["title"], "Sunrise walk");

    let bad = reqwest::get(format!("http://{addr}/api/v1/events/nearby?latitude=x&longitude=1"))
        .await
        .unwrap_or_else(|e| panic!("request failed: {e}"));
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);

    server.abort();
}
