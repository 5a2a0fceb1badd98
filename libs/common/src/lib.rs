//! Shared infrastructure for the YouTube console backend
//!
//! This crate provides the pieces the API service needs but that are not
//! specific to any one route: PostgreSQL connection pooling for the audit
//! log, Redis connectivity for the session store, and the shared database
//! error taxonomy.

pub mod cache;
pub mod database;
pub mod error;
