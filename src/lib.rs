//! # campus-hub
//!
//! Event discovery API for campus associations.
//!
//! Students look up published, upcoming events near them: the service
//! loads candidate events from storage, computes Haversine distances to
//! the user's position, keeps those within the requested radius and
//! returns the closest ones first.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EventService (service/)
//!     │
//!     ├── Geo + ranking (domain/)
//!     │
//!     └── EventStore (persistence/): PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::HubConfig;
use crate::persistence::EventStore;
use crate::service::EventService;

/// Builds the application state around an injected store.
#[must_use]
pub fn build_state(config: &HubConfig, store: Arc<dyn EventStore>) -> AppState {
    let event_service = EventService::new(
        store,
        config.nearby_settings(),
        Duration::from_secs(config.store_timeout_secs),
    );
    AppState {
        event_service: Arc::new(event_service),
    }
}

/// Builds the full HTTP application: routes, tracing, CORS and the
/// request timeout.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
