//! Application state shared across handlers

use crate::{
    config::AppConfig, event_log::EventLogger, notes::NotesStore, oauth::OAuthClient,
    session::SessionStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub oauth: OAuthClient,
    pub sessions: SessionStore,
    pub event_log: EventLogger,
    pub notes: NotesStore,
    pub http: reqwest::Client,
}
