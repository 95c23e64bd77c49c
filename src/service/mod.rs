//! Service layer: orchestrates store reads and in-memory ranking.

pub mod event_service;

pub use event_service::EventService;
