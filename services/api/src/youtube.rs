//! Per-request gateway to the YouTube Data API v3
//!
//! A `YouTubeClient` is built fresh for each request from the shared HTTP
//! client and the caller's access token, mirroring how the session scopes
//! every platform call to the authenticated user. Responses are passed
//! through as JSON; only comment threads get reshaped into a compact form.

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    error::{ApiError, ApiResult},
    models::CommentSummary,
};

/// Production endpoint of the YouTube Data API
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Page size for top-level comments on a video fetch
const COMMENT_PAGE_SIZE: u32 = 20;

/// YouTube keeps the content category on update; "People & Blogs"
const DEFAULT_CATEGORY_ID: &str = "22";

/// Thin client over the YouTube Data API, scoped to one access token
pub struct YouTubeClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl YouTubeClient {
    /// Create a client for the caller's access token against the given API
    /// base URL (the configured one in production)
    pub fn new(http: reqwest::Client, access_token: &str, base_url: &str) -> Self {
        Self {
            http,
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch video metadata (`videos.list part=snippet`); `None` when the
    /// video does not exist or is not visible to the caller
    pub async fn fetch_video(&self, video_id: &str) -> ApiResult<Option<Value>> {
        let response = self
            .http
            .get(format!("{}/videos", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("part", "snippet"), ("id", video_id)])
            .send()
            .await?;

        let body = into_json(response).await?;
        let item = body
            .get("items")
            .and_then(|items| items.get(0))
            .cloned();

        Ok(item)
    }

    /// List up to a page of top-level comments for a video
    pub async fn list_comments(&self, video_id: &str) -> ApiResult<Vec<CommentSummary>> {
        let max_results = COMMENT_PAGE_SIZE.to_string();
        let response = self
            .http
            .get(format!("{}/commentThreads", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("textFormat", "plainText"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        let body = into_json(response).await?;
        Ok(map_comment_threads(&body))
    }

    /// Submit a new top-level comment and return the created resource
    pub async fn insert_comment(&self, video_id: &str, text: &str) -> ApiResult<Value> {
        let response = self
            .http
            .post(format!("{}/commentThreads", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("part", "snippet")])
            .json(&json!({
                "snippet": {
                    "videoId": video_id,
                    "topLevelComment": {
                        "snippet": {
                            "textOriginal": text,
                        },
                    },
                },
            }))
            .send()
            .await?;

        into_json(response).await
    }

    /// Update only the video title, preserving the fixed content category
    pub async fn update_video_title(&self, video_id: &str, title: &str) -> ApiResult<Value> {
        let response = self
            .http
            .put(format!("{}/videos", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("part", "snippet")])
            .json(&json!({
                "id": video_id,
                "snippet": {
                    "title": title,
                    "categoryId": DEFAULT_CATEGORY_ID,
                },
            }))
            .send()
            .await?;

        into_json(response).await
    }

    /// Remove a comment by id
    pub async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        let response = self
            .http
            .delete(format!("{}/comments", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("id", comment_id)])
            .send()
            .await?;

        into_json(response).await?;
        Ok(())
    }
}

/// Convert a platform response into JSON, mapping failures to the
/// platform's reported error
async fn into_json(response: reqwest::Response) -> ApiResult<Value> {
    let status = response.status();

    if status.is_success() {
        // comments.delete answers 204 with an empty body
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let body = response.json().await?;
        return Ok(body);
    }

    let details: Value = response.json().await.unwrap_or(Value::Null);
    Err(upstream_error(status.as_u16(), details))
}

/// Build an upstream error from Google's error payload, preferring the
/// status code and message the platform reports
fn upstream_error(http_status: u16, details: Value) -> ApiError {
    let reported = details.get("error");

    let status = reported
        .and_then(|e| e.get("code"))
        .and_then(Value::as_u64)
        .map(|code| code as u16)
        .unwrap_or(http_status);

    let message = reported
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("YouTube API request failed")
        .to_string();

    ApiError::Upstream {
        status,
        message,
        details,
    }
}

/// Reshape a `commentThreads.list` response into comment summaries,
/// skipping items that lack a top-level comment snippet
fn map_comment_threads(body: &Value) -> Vec<CommentSummary> {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = item.get("id").and_then(Value::as_str)?;
            let snippet = item
                .get("snippet")?
                .get("topLevelComment")?
                .get("snippet")?;

            Some(CommentSummary {
                id: id.to_string(),
                text: snippet
                    .get("textOriginal")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                author: snippet
                    .get("authorDisplayName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                published_at: snippet
                    .get("publishedAt")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_comment_threads() {
        let body = json!({
            "items": [
                {
                    "id": "thread-1",
                    "snippet": {
                        "topLevelComment": {
                            "snippet": {
                                "textOriginal": "nice!",
                                "authorDisplayName": "Viewer",
                                "publishedAt": "2024-05-01T12:00:00Z",
                            },
                        },
                    },
                },
            ],
        });

        let comments = map_comment_threads(&body);
        assert_eq!(
            comments,
            vec![CommentSummary {
                id: "thread-1".to_string(),
                text: "nice!".to_string(),
                author: "Viewer".to_string(),
                published_at: "2024-05-01T12:00:00Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_map_comment_threads_skips_malformed_items() {
        let body = json!({
            "items": [
                {"id": "thread-1"},
                {
                    "id": "thread-2",
                    "snippet": {
                        "topLevelComment": {
                            "snippet": {},
                        },
                    },
                },
            ],
        });

        let comments = map_comment_threads(&body);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "thread-2");
        assert_eq!(comments[0].text, "");
    }

    #[test]
    fn test_map_comment_threads_tolerates_missing_items() {
        assert!(map_comment_threads(&json!({})).is_empty());
        assert!(map_comment_threads(&json!({"items": "oops"})).is_empty());
    }

    #[test]
    fn test_upstream_error_prefers_reported_code_and_message() {
        let details = json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
            },
        });

        let err = upstream_error(500, details.clone());
        match err {
            ApiError::Upstream {
                status,
                message,
                details: payload,
            } => {
                assert_eq!(status, 403);
                assert!(message.contains("quota"));
                assert_eq!(payload, details);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_upstream_error_defaults_on_unparseable_payload() {
        let err = upstream_error(502, Value::Null);
        match err {
            ApiError::Upstream {
                status, message, ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "YouTube API request failed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
