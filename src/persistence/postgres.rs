//! PostgreSQL implementation of [`EventStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{EVENT_COLUMNS, EventRow};
use super::{EventPage, EventStore};
use crate::config::HubConfig;
use crate::domain::{Event, EventId, EventStatus};
use crate::error::HubError;

/// Opens a connection pool using the database settings of `config`.
///
/// # Errors
///
/// Returns [`HubError::UpstreamUnavailable`] if no connection can be
/// established.
pub async fn connect(config: &HubConfig) -> Result<PgPool, HubError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns [`HubError::Internal`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), HubError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| HubError::Internal(format!("migration failed: {e}")))
}

/// PostgreSQL-backed event store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_events(rows: Vec<EventRow>) -> Result<Vec<Event>, HubError> {
    rows.into_iter().map(Event::try_from).collect()
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn nearby_candidates(&self, now: DateTime<Utc>) -> Result<Vec<Event>, HubError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events e \
             JOIN associations a ON a.id = e.association_id \
             WHERE e.status = $1 AND e.start_date >= $2 \
             AND e.latitude IS NOT NULL AND e.longitude IS NOT NULL \
             ORDER BY e.start_date ASC, e.id ASC"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(EventStatus::Published.as_str())
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        offset: u64,
        limit: u64,
    ) -> Result<EventPage, HubError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE status = $1 AND start_date >= $2",
        )
        .bind(EventStatus::Published.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events e \
             JOIN associations a ON a.id = e.association_id \
             WHERE e.status = $1 AND e.start_date >= $2 \
             ORDER BY e.start_date ASC, e.id ASC \
             OFFSET $3 LIMIT $4"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(EventStatus::Published.as_str())
            .bind(now)
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(EventPage {
            events: into_events(rows)?,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn find_published(&self, id: EventId) -> Result<Option<Event>, HubError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events e \
             JOIN associations a ON a.id = e.association_id \
             WHERE e.id = $1 AND e.status = $2"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(*id.as_uuid())
            .bind(EventStatus::Published.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Event::try_from).transpose()
    }
}
