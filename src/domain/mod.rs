//! Domain layer: coordinates, distance engine, events and ranking.
//!
//! Everything here is pure and synchronous. Storage access lives in
//! [`crate::persistence`], orchestration in [`crate::service`].

pub mod coordinate;
pub mod event;
pub mod event_id;
pub mod geo;
pub mod nearby;

pub use coordinate::Coordinate;
pub use event::{AssociationRef, Event, EventStatus};
pub use event_id::EventId;
pub use nearby::{NearbyEvent, NearbyQuery, NearbySettings, rank_nearby};
