//! Association events as read by the discovery endpoints.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Coordinate, EventId};
use crate::error::HubError;

/// Publication state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Being edited by the association, not visible to students.
    Draft,
    /// Visible and open for discovery.
    Published,
    /// Called off by the association.
    Cancelled,
    /// Took place and was closed.
    Completed,
}

impl EventStatus {
    /// Storage representation (`"PUBLISHED"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(HubError::Internal(format!("unknown event status: {other}"))),
        }
    }
}

/// Owning association, reduced to what the listings display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssociationRef {
    /// Association identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
}

/// An event record.
///
/// Created and edited by association admins elsewhere in the system;
/// this service only reads snapshots of it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Title shown in listings.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional venue label (e.g. `"Amphi B"`).
    pub location: Option<String>,
    /// Venue latitude in degrees, if geotagged.
    pub latitude: Option<f64>,
    /// Venue longitude in degrees, if geotagged.
    pub longitude: Option<f64>,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// Optional end timestamp.
    pub end_date: Option<DateTime<Utc>>,
    /// Publication state.
    pub status: EventStatus,
    /// Owning association.
    pub association: AssociationRef,
    /// Number of registrations (display only).
    pub registration_count: u64,
}

impl Event {
    /// Creates an event without geotag, description or registrations.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        association: AssociationRef,
        start_date: DateTime<Utc>,
        status: EventStatus,
    ) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            description: None,
            location: None,
            latitude: None,
            longitude: None,
            start_date,
            end_date: None,
            status,
            association,
            registration_count: 0,
        }
    }

    /// Sets the venue coordinates.
    #[must_use]
    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the registration count.
    #[must_use]
    pub fn with_registrations(mut self, count: u64) -> Self {
        self.registration_count = count;
        self
    }

    /// Returns the venue as a validated [`Coordinate`].
    ///
    /// `None` when either component is missing or holds an out-of-range
    /// value.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// `true` for published events starting at or after `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Published && self.start_date >= now
    }

    /// `true` if the event may appear in a nearby search at `now`:
    /// published, not yet started and geotagged.
    #[must_use]
    pub fn is_nearby_candidate(&self, now: DateTime<Utc>) -> bool {
        self.is_upcoming(now) && self.latitude.is_some() && self.longitude.is_some()
    }
}
