//! Event service: orchestrates validated queries against the event store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{Event, EventId, NearbyEvent, NearbyQuery, NearbySettings, rank_nearby};
use crate::error::HubError;
use crate::persistence::{EventPage, EventStore};

/// Orchestration layer for the discovery endpoints.
///
/// Stateless: owns an injected [`EventStore`] and the nearby-query
/// settings. Every call performs at most one store read, bounded by
/// `store_timeout`, followed by pure in-memory work.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
    settings: NearbySettings,
    store_timeout: Duration,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStore>,
        settings: NearbySettings,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            settings,
            store_timeout,
        }
    }

    /// Nearby-query settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &NearbySettings {
        &self.settings
    }

    /// Returns the closest upcoming events within the query radius.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UpstreamUnavailable`] if the store read fails
    /// or times out. No partial result is ever returned.
    pub async fn nearby_events(&self, query: &NearbyQuery) -> Result<Vec<NearbyEvent>, HubError> {
        self.nearby_events_at(query, Utc::now()).await
    }

    /// [`Self::nearby_events`] evaluated at a fixed instant.
    ///
    /// # Errors
    ///
    /// See [`Self::nearby_events`].
    pub async fn nearby_events_at(
        &self,
        query: &NearbyQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<NearbyEvent>, HubError> {
        let candidates = self
            .bounded("nearby candidates", self.store.nearby_candidates(now))
            .await?;
        let candidate_count = candidates.len();

        let ranked = rank_nearby(query, self.settings.limit, now, candidates);

        tracing::debug!(
            latitude = query.origin.latitude(),
            longitude = query.origin.longitude(),
            radius_km = query.radius_km,
            candidates = candidate_count,
            returned = ranked.len(),
            "nearby events ranked"
        );
        Ok(ranked)
    }

    /// Returns one page of upcoming published events.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UpstreamUnavailable`] if the store read fails
    /// or times out.
    pub async fn upcoming_events(&self, offset: u64, limit: u64) -> Result<EventPage, HubError> {
        self.bounded(
            "upcoming events",
            self.store.list_upcoming(Utc::now(), offset, limit),
        )
        .await
    }

    /// Returns a published event by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::EventNotFound`] if no published event has this
    /// id, or [`HubError::UpstreamUnavailable`] if the store read fails.
    pub async fn event(&self, id: EventId) -> Result<Event, HubError> {
        self.bounded("event by id", self.store.find_published(id))
            .await?
            .ok_or(HubError::EventNotFound(*id.as_uuid()))
    }

    /// Runs a store read under the configured timeout.
    async fn bounded<T>(
        &self,
        what: &str,
        read: impl Future<Output = Result<T, HubError>>,
    ) -> Result<T, HubError> {
        match tokio::time::timeout(self.store_timeout, read).await {
            Ok(result) => result,
            Err(_) => Err(HubError::UpstreamUnavailable(format!(
                "store read ({what}) timed out after {:?}",
                self.store_timeout
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AssociationRef, Coordinate, EventStatus};
    use crate::persistence::InMemoryEventStore;
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;

    fn association() -> AssociationRef {
        AssociationRef {
            id: uuid::Uuid::new_v4(),
            name: "Photo Club".to_string(),
        }
    }

    fn make_service(store: Arc<InMemoryEventStore>) -> EventService {
        EventService::new(store, NearbySettings::default(), Duration::from_secs(5))
    }

    fn query(radius: f64) -> NearbyQuery {
        let Ok(origin) = Coordinate::new(48.8566, 2.3522) else {
            panic!("valid origin");
        };
        let Ok(q) = NearbyQuery::new(origin, Some(radius), &NearbySettings::default()) else {
            panic!("valid query");
        };
        q
    }

    fn event(title: &str, now: DateTime<Utc>, days: i64, status: EventStatus) -> Event {
        Event::new(title, association(), now + ChronoDuration::days(days), status)
    }

    #[tokio::test]
    async fn nearby_events_ranks_store_candidates() {
        let now = Utc::now();
        let a = event("A", now, 1, EventStatus::Published).at(48.85, 2.35);
        let b = event("B", now, 2, EventStatus::Published).at(51.50, -0.12);
        let c = event("C", now, 3, EventStatus::Draft).at(48.86, 2.36);
        let store = Arc::new(InMemoryEventStore::with_events(vec![b, c, a]));
        let service = make_service(Arc::clone(&store));

        let Ok(ranked) = service.nearby_events_at(&query(400.0), now).await else {
            panic!("query failed");
        };
        let titles: Vec<&str> = ranked.iter().map(|n| n.event.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(store.read_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_upstream_unavailable() {
        let store = Arc::new(InMemoryEventStore::new());
        store.set_unavailable(true);
        let service = make_service(store);
        let result = service.nearby_events(&query(50.0)).await;
        assert!(matches!(result, Err(HubError::UpstreamUnavailable(_))));
    }

    #[derive(Debug)]
    struct StalledStore;

    #[async_trait]
    impl EventStore for StalledStore {
        async fn nearby_candidates(&self, _now: DateTime<Utc>) -> Result<Vec<Event>, HubError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![])
        }

        async fn list_upcoming(
            &self,
            _now: DateTime<Utc>,
            _offset: u64,
            _limit: u64,
        ) -> Result<EventPage, HubError> {
            Ok(EventPage::default())
        }

        async fn find_published(&self, _id: EventId) -> Result<Option<Event>, HubError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let service = EventService::new(
            Arc::new(StalledStore),
            NearbySettings::default(),
            Duration::from_millis(50),
        );
        let result = service.nearby_events(&query(50.0)).await;
        assert!(matches!(result, Err(HubError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let service = make_service(Arc::new(InMemoryEventStore::new()));
        let result = service.event(EventId::new()).await;
        assert!(matches!(result, Err(HubError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn upcoming_events_pages_through_store() {
        let now = Utc::now();
        let events = (1..=3)
            .map(|d| event(&format!("e{d}"), now, d, EventStatus::Published))
            .collect();
        let service = make_service(Arc::new(InMemoryEventStore::with_events(events)));
        let Ok(page) = service.upcoming_events(0, 2).await else {
            panic!("listing failed");
        };
        assert_eq!(page.total, 3);
        assert_eq!(page.events.len(), 2);
    }
}
