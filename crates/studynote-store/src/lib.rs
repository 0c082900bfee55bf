//! studynote-store: PostgreSQL storage layer for the studynote service
//!
//! This crate provides:
//! - Pooled PostgreSQL access for notes and users
//! - Embedded, idempotent migrations
//! - Type-safe database operations via sqlx
//!
//! Every note operation is scoped by the owning user's id; ownership is
//! enforced in SQL rather than in application code.
//!
//! # Usage
//!
//! ```rust,ignore
//! use studynote_store::{Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let rows = store.list_notes(user_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{NewNote, NewUser, NoteChanges, NoteRow, UserRow};
pub use store::{Store, StoreConfig};

// Re-export studynote-core for downstream crates
pub use studynote_core;
