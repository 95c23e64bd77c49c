//! In-memory [`EventStore`].
//!
//! Holds events in a `tokio::sync::RwLock<Vec<Event>>` and answers reads
//! with the same filtering and ordering as the PostgreSQL store. Used
//! when persistence is disabled and as the store behind service and HTTP
//! tests, which is why it counts reads and can simulate an outage.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{EventPage, EventStore};
use crate::domain::{Event, EventId, EventStatus};
use crate::error::HubError;

/// Event store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<Event>>,
    reads: AtomicU64,
    unavailable: AtomicBool,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `events`.
    ///
    /// Ids stay unique as with [`Self::insert`]: a later event reusing an
    /// id already seen is dropped.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::with_capacity(events.len());
        let events: Vec<Event> = events
            .into_iter()
            .filter(|event| {
                let fresh = seen.insert(event.id);
                if !fresh {
                    tracing::warn!(event_id = %event.id, "duplicate event id dropped");
                }
                fresh
            })
            .collect();
        Self {
            events: RwLock::new(events),
            ..Self::default()
        }
    }

    /// Adds an event.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidArgument`] if an event with the same id
    /// is already stored.
    pub async fn insert(&self, event: Event) -> Result<EventId, HubError> {
        let id = event.id;
        let mut events = self.events.write().await;
        if events.iter().any(|e| e.id == id) {
            return Err(HubError::InvalidArgument(format!(
                "event {id} already exists"
            )));
        }
        events.push(event);
        Ok(id)
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if no event is stored.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Number of read operations served (or attempted) so far.
    #[must_use]
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Makes every subsequent read fail with
    /// [`HubError::UpstreamUnavailable`] while `true`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn begin_read(&self) -> Result<(), HubError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(HubError::UpstreamUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    /// Published events starting at or after `now`, start date then id.
    async fn upcoming(&self, now: DateTime<Utc>) -> Vec<Event> {
        let events = self.events.read().await;
        let mut upcoming: Vec<Event> = events
            .iter()
            .filter(|e| e.is_upcoming(now))
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        upcoming
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn nearby_candidates(&self, now: DateTime<Utc>) -> Result<Vec<Event>, HubError> {
        self.begin_read()?;
        let mut candidates = self.upcoming(now).await;
        candidates.retain(|e| e.is_nearby_candidate(now));
        Ok(candidates)
    }

    async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        offset: u64,
        limit: u64,
    ) -> Result<EventPage, HubError> {
        self.begin_read()?;
        let upcoming = self.upcoming(now).await;
        let total = upcoming.len() as u64;
        let events = upcoming
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Ok(EventPage { events, total })
    }

    async fn find_published(&self, id: EventId) -> Result<Option<Event>, HubError> {
        self.begin_read()?;
        let events = self.events.read().await;
        Ok(events
            .iter()
            .find(|e| e.id == id && e.status == EventStatus::Published)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssociationRef;
    use chrono::Duration;

    fn event(title: &str, start: DateTime<Utc>, status: EventStatus) -> Event {
        let association = AssociationRef {
            id: uuid::Uuid::new_v4(),
            name: "Chess Club".to_string(),
        };
        Event::new(title, association, start, status)
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = InMemoryEventStore::new();
        let e = event("a", Utc::now(), EventStatus::Published);
        assert!(store.insert(e.clone()).await.is_ok());
        assert!(store.insert(e).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn with_events_keeps_ids_unique() {
        let now = Utc::now();
        let first = event("first", now + Duration::days(1), EventStatus::Published);
        let mut copy = event("copy", now + Duration::days(2), EventStatus::Published);
        copy.id = first.id;
        let store = InMemoryEventStore::with_events(vec![first.at(1.0, 1.0), copy.at(1.0, 1.0)]);

        assert_eq!(store.len().await, 1);
        let Ok(candidates) = store.nearby_candidates(now).await else {
            panic!("read failed");
        };
        let titles: Vec<&str> = candidates.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first"]);
    }

    #[tokio::test]
    async fn candidates_are_eligible_and_chronological() {
        let now = Utc::now();
        let later = event("later", now + Duration::days(2), EventStatus::Published).at(1.0, 1.0);
        let sooner = event("sooner", now + Duration::days(1), EventStatus::Published).at(1.0, 1.0);
        let untagged = event("untagged", now + Duration::days(1), EventStatus::Published);
        let draft = event("draft", now + Duration::days(1), EventStatus::Draft).at(1.0, 1.0);
        let store = InMemoryEventStore::with_events(vec![later, untagged, draft, sooner]);

        let Ok(candidates) = store.nearby_candidates(now).await else {
            panic!("read failed");
        };
        let titles: Vec<&str> = candidates.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later"]);
        assert_eq!(store.read_count(), 1);
    }

    #[tokio::test]
    async fn list_upcoming_pages_and_counts() {
        let now = Utc::now();
        let events = (1..=5)
            .map(|d| event(&format!("e{d}"), now + Duration::days(d), EventStatus::Published))
            .collect();
        let store = InMemoryEventStore::with_events(events);

        let Ok(page) = store.list_upcoming(now, 2, 2).await else {
            panic!("read failed");
        };
        assert_eq!(page.total, 5);
        let titles: Vec<&str> = page.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["e3", "e4"]);
    }

    #[tokio::test]
    async fn find_published_hides_drafts() {
        let draft = event("draft", Utc::now(), EventStatus::Draft);
        let id = draft.id;
        let store = InMemoryEventStore::with_events(vec![draft]);
        let Ok(found) = store.find_published(id).await else {
            panic!("read failed");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let store = InMemoryEventStore::new();
        store.set_unavailable(true);
        let result = store.nearby_candidates(Utc::now()).await;
        assert!(matches!(result, Err(HubError::UpstreamUnavailable(_))));
    }
}
