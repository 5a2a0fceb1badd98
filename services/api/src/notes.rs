//! Ephemeral per-user, per-video notes
//!
//! Notes live only in process memory and are lost on restart. The store is
//! an explicit repository over the (user, video) key so a durable backing
//! could replace the map without touching the handlers. Write-append only:
//! there are no read, update, or delete operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// A freeform note attached to a video by its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory keyed store of notes under (user id, video id)
#[derive(Clone, Default)]
pub struct NotesStore {
    entries: Arc<Mutex<HashMap<(String, String), Vec<Note>>>>,
}

impl NotesStore {
    /// Create an empty notes store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note for the given (user, video) pair and return it
    pub async fn add_note(&self, user_id: &str, video_id: &str, text: &str) -> ApiResult<Note> {
        if user_id.trim().is_empty() {
            return Err(ApiError::BadRequest("User ID not found".to_string()));
        }
        if text.trim().is_empty() {
            return Err(ApiError::BadRequest("Note is required".to_string()));
        }

        let note = Note {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: Utc::now(),
        };

        let mut entries = self.entries.lock().await;
        entries
            .entry((user_id.to_string(), video_id.to_string()))
            .or_default()
            .push(note.clone());

        Ok(note)
    }

    /// Number of notes held for a (user, video) pair
    #[cfg(test)]
    async fn count(&self, user_id: &str, video_id: &str) -> usize {
        let entries = self.entries.lock().await;
        entries
            .get(&(user_id.to_string(), video_id.to_string()))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notes_preserve_order_with_distinct_ids() {
        let store = NotesStore::new();

        let first = store.add_note("user-1", "video-1", "first").await.unwrap();
        let second = store.add_note("user-1", "video-1", "second").await.unwrap();

        assert_ne!(first.id, second.id);

        let entries = store.entries.lock().await;
        let notes = entries
            .get(&("user-1".to_string(), "video-1".to_string()))
            .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "first");
        assert_eq!(notes[1].text, "second");
    }

    #[tokio::test]
    async fn test_empty_note_is_rejected() {
        let store = NotesStore::new();

        let err = store.add_note("user-1", "video-1", "   ").await.unwrap_err();
        match err {
            ApiError::BadRequest(message) => assert_eq!(message, "Note is required"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.count("user-1", "video-1").await, 0);
    }

    #[tokio::test]
    async fn test_missing_user_is_rejected() {
        let store = NotesStore::new();

        let err = store.add_note("", "video-1", "hello").await.unwrap_err();
        match err {
            ApiError::BadRequest(message) => assert_eq!(message, "User ID not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notes_are_scoped_per_user_and_video() {
        let store = NotesStore::new();

        store.add_note("user-1", "video-1", "a").await.unwrap();
        store.add_note("user-2", "video-1", "b").await.unwrap();
        store.add_note("user-1", "video-2", "c").await.unwrap();

        assert_eq!(store.count("user-1", "video-1").await, 1);
        assert_eq!(store.count("user-2", "video-1").await, 1);
        assert_eq!(store.count("user-1", "video-2").await, 1);
        assert_eq!(store.count("user-2", "video-2").await, 0);
    }
}
