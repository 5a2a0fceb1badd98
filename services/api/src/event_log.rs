//! Append-only audit log for gateway actions
//!
//! Recording is fire-and-forget: a failed insert is reported on the
//! diagnostic log and never bubbles into the business operation that
//! triggered it. Entries are never updated or deleted.

use anyhow::Result;
use sqlx::PgPool;
use tracing::error;

/// Kinds of events the audit trail records
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventType {
    VideoFetch,
    CommentAdd,
    VideoUpdate,
    CommentDelete,
    Error,
}

impl EventType {
    /// Get the event type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::VideoFetch => "VIDEO_FETCH",
            EventType::CommentAdd => "COMMENT_ADD",
            EventType::VideoUpdate => "VIDEO_UPDATE",
            EventType::CommentDelete => "COMMENT_DELETE",
            EventType::Error => "ERROR",
        }
    }
}

/// Best-effort sink for audit events
#[derive(Clone)]
pub struct EventLogger {
    pool: PgPool,
}

impl EventLogger {
    /// Create a new event logger on the shared pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure the event log table exists; run once at startup
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS event_logs (
                id BIGSERIAL PRIMARY KEY,
                event_type TEXT NOT NULL,
                details TEXT NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record an event. Failures are swallowed after being logged
    /// diagnostically so audit problems never fail the caller's request.
    pub async fn record(&self, event_type: EventType, details: &str) {
        let result = sqlx::query(
            r#"
            INSERT INTO event_logs (event_type, details)
            VALUES ($1, $2)
            "#,
        )
        .bind(event_type.as_str())
        .bind(details)
        .execute(&self.pool)
        .await;

        if let Err(err) = result {
            error!("Error logging event {}: {}", event_type.as_str(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(EventType::VideoFetch.as_str(), "VIDEO_FETCH");
        assert_eq!(EventType::CommentAdd.as_str(), "COMMENT_ADD");
        assert_eq!(EventType::VideoUpdate.as_str(), "VIDEO_UPDATE");
        assert_eq!(EventType::CommentDelete.as_str(), "COMMENT_DELETE");
        assert_eq!(EventType::Error.as_str(), "ERROR");
    }
}
