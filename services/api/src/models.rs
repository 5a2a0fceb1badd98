//! API models for request and response payloads

use serde::{Deserialize, Serialize};

/// Request body for adding a comment to a video
#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
}

/// Request body for updating a video title
#[derive(Deserialize)]
pub struct UpdateVideoRequest {
    pub title: String,
}

/// Request body for attaching a note to a video
#[derive(Deserialize)]
pub struct AddNoteRequest {
    pub note: String,
}

/// Public view of the authenticated user, as reported by `/auth/status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

/// Response for `/auth/status`
#[derive(Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// A top-level comment as returned by the video fetch endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    pub id: String,
    pub text: String,
    pub author: String,
    pub published_at: String,
}
