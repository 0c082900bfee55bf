//! studynote-cache: note cache and synchronization layer
//!
//! This crate is the consistency core of the service. It provides:
//!
//! - [`NoteCache`]: an explicit keyed store of query results (one list slot
//!   per user, one detail slot per note) with a
//!   `Fresh -> Stale -> Refetching -> Fresh` lifecycle per slot
//! - [`NoteService`]: the note actions (list, get, create, update, delete,
//!   save_summary) layered over the cache and the database store, applying
//!   each successful mutation to every affected slot synchronously instead
//!   of refetching
//!
//! The delete path is optimistic: the note is removed from list slots
//! before the store confirms, with enough information recorded (the note
//! and its position) to reverse the removal if the store call fails.
//!
//! Concurrency model: slots are guarded by `RwLock`; writes from one
//! mutation are applied atomically relative to readers. There is no
//! cross-mutation ordering guarantee - the later-completing mutation wins.

pub mod cache;
pub mod error;
pub mod service;

pub use cache::{CacheStatus, NoteCache, PendingRemoval};
pub use error::{ActionError, ActionResult};
pub use service::NoteService;

// Re-export dependent crates
pub use studynote_core;
pub use studynote_store;
