//! Authorization gate for the YouTube proxy routes
//!
//! Resolves the session cookie into an immutable `UserSession` once per
//! request and hands it to the handlers through request extensions. A
//! request without a live session, or whose session lost its access token,
//! is rejected before any business logic runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use crate::{error::ApiError, session::SESSION_COOKIE, state::AppState};

/// Authentication middleware guarding every `/api/youtube` route
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());

    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))?;

    let session = state
        .sessions
        .get(&session_id)
        .await
        .map_err(|err| {
            error!("Failed to load session: {}", err);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))?;

    if session.access_token.trim().is_empty() {
        return Err(ApiError::Unauthorized(
            "No access token available. Please log in again.".to_string(),
        ));
    }

    // The resolved session is the only ambient state handlers see
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
