//! Session store backed by Redis
//!
//! A session is an opaque id handed to the browser in a cookie, mapping to a
//! serialized user record in Redis. Redis TTLs give sessions their fixed
//! lifetime; an expired session simply disappears and the next request is
//! treated as unauthenticated. The same store keeps the short-lived OAuth
//! handshake records written between `/auth/google` and its callback.

use anyhow::Result;
use common::cache::RedisPool;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::oauth::LoginHandshake;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sid";

/// Handshake records only need to survive the provider round trip
const HANDSHAKE_TTL_SECONDS: u64 = 600;

/// Authenticated user record held for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Provider-issued user id
    pub id: String,
    pub display_name: String,
    pub email: String,
    /// Short-lived credential for YouTube Data API calls. Empty means the
    /// user must re-authenticate.
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Keyed store of active sessions and in-flight OAuth handshakes
#[derive(Clone)]
pub struct SessionStore {
    redis: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store with the given session lifetime
    pub fn new(redis: RedisPool, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    /// Persist a new session and return its opaque id
    pub async fn create(&self, session: &UserSession) -> Result<String> {
        let session_id = Uuid::new_v4().simple().to_string();
        info!("Creating session for user: {}", session.id);

        let payload = serde_json::to_string(session)?;
        self.redis
            .set_ex(&session_key(&session_id), &payload, self.ttl_seconds)
            .await?;

        Ok(session_id)
    }

    /// Resolve a session id to its user record, if the session is still alive
    pub async fn get(&self, session_id: &str) -> Result<Option<UserSession>> {
        let payload = self.redis.get(&session_key(session_id)).await?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Destroy a session. Deleting an unknown id is not an error.
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        info!("Deleting session: {}", session_id);
        self.redis.delete(&session_key(session_id)).await?;
        Ok(())
    }

    /// Store an OAuth handshake record keyed by its CSRF state token
    pub async fn store_handshake(&self, handshake: &LoginHandshake) -> Result<()> {
        let payload = serde_json::to_string(handshake)?;
        self.redis
            .set_ex(
                &handshake_key(&handshake.csrf_token),
                &payload,
                HANDSHAKE_TTL_SECONDS,
            )
            .await?;

        Ok(())
    }

    /// Consume the handshake record for a state token. GETDEL makes the
    /// record usable exactly once even across concurrent callbacks.
    pub async fn take_handshake(&self, csrf_token: &str) -> Result<Option<LoginHandshake>> {
        let payload = self.redis.get_del(&handshake_key(csrf_token)).await?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }
}

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

fn handshake_key(csrf_token: &str) -> String {
    format!("oauth:state:{}", csrf_token)
}
