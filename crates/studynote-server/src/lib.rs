//! studynote-server: HTTP API server for the StudyNote platform
//!
//! This crate provides:
//! - REST API endpoints for notes (list, create, read, update, delete)
//! - Account registration and JWT session management
//! - AI endpoints (summarize, study guide) backed by studynote-ai
//! - Server-Sent Events (SSE) for per-user note change notifications
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! Note reads and writes go through [`studynote_cache::NoteService`], which
//! keeps an in-process cache in front of the database.

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use events::NoteEventBroadcaster;
pub use state::AppState;

// Re-export dependent crates
pub use studynote_cache;
pub use studynote_core;
pub use studynote_store;
