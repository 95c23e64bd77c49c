//! Database row models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AssociationRef, Event, EventId, EventStatus};
use crate::error::HubError;

/// Columns selected for every event query.
///
/// The registration count is computed by a correlated sub-select so a
/// single statement returns complete records.
pub const EVENT_COLUMNS: &str = "e.id, e.title, e.description, e.location, e.latitude, \
     e.longitude, e.start_date, e.end_date, e.status, a.id AS association_id, \
     a.name AS association_name, \
     (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) AS registration_count";

/// One row of an event query joined with its association.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Event id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Venue label.
    pub location: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// End timestamp.
    pub end_date: Option<DateTime<Utc>>,
    /// Status as stored (`"PUBLISHED"`, ...).
    pub status: String,
    /// Owning association id.
    pub association_id: Uuid,
    /// Owning association name.
    pub association_name: String,
    /// `COUNT(*)` of registrations.
    pub registration_count: i64,
}

impl TryFrom<EventRow> for Event {
    type Error = HubError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status.parse::<EventStatus>()?,
            association: AssociationRef {
                id: row.association_id,
                name: row.association_name,
            },
            registration_count: u64::try_from(row.registration_count).unwrap_or(0),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row(status: &str) -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            title: "Career fair".to_string(),
            description: None,
            location: Some("Hall A".to_string()),
            latitude: Some(45.0),
            longitude: Some(5.0),
            start_date: Utc::now(),
            end_date: None,
            status: status.to_string(),
            association_id: Uuid::new_v4(),
            association_name: "Alumni".to_string(),
            registration_count: 17,
        }
    }

    #[test]
    fn converts_row_to_event() {
        let Ok(event) = Event::try_from(row("PUBLISHED")) else {
            panic!("valid row");
        };
        assert_eq!(event.status, EventStatus::Published);
        assert_eq!(event.registration_count, 17);
        assert_eq!(event.association.name, "Alumni");
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!(Event::try_from(row("ARCHIVED")).is_err());
    }
}
