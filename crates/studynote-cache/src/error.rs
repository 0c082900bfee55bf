//! Error type for note actions.

use thiserror::Error;

use studynote_core::{NoteId, ValidationError};
use studynote_store::StoreError;

/// Result type alias for note actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Failures a note action can surface.
///
/// Authentication is rejected before a service method is ever reached (the
/// HTTP layer refuses callers without a session), so there is no auth
/// variant here.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The note does not exist (or is not owned by the caller).
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ActionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NoteNotFound(id) => Self::NotFound(NoteId::from_uuid(id)),
            other => Self::Store(other),
        }
    }
}
