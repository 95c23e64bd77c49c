//! Persistence layer: read access to association events.
//!
//! [`EventStore`] is the only contract the service relies on. Two
//! implementations exist: [`postgres::PostgresEventStore`] backed by
//! `sqlx::PgPool`, and [`memory::InMemoryEventStore`] used when
//! persistence is disabled and in tests.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Event, EventId};
use crate::error::HubError;

pub use memory::InMemoryEventStore;
pub use postgres::PostgresEventStore;

/// One page of upcoming events plus the total number available.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    /// Events of the requested page, start date ascending.
    pub events: Vec<Event>,
    /// Number of upcoming events across all pages.
    pub total: u64,
}

/// Read-only access to stored events.
///
/// Every method is a single read; failures surface as
/// [`HubError::UpstreamUnavailable`].
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Loads every published, geotagged event starting at or after `now`,
    /// ordered by start date ascending (then id).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UpstreamUnavailable`] if the store cannot be read.
    async fn nearby_candidates(&self, now: DateTime<Utc>) -> Result<Vec<Event>, HubError>;

    /// Loads one page of published events starting at or after `now`,
    /// geotagged or not, ordered by start date ascending (then id).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UpstreamUnavailable`] if the store cannot be read.
    async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        offset: u64,
        limit: u64,
    ) -> Result<EventPage, HubError>;

    /// Loads a published event by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UpstreamUnavailable`] if the store cannot be read.
    async fn find_published(&self, id: EventId) -> Result<Option<Event>, HubError>;
}
