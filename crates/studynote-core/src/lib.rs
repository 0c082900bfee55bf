//! studynote-core: Core types and validation for the studynote service
//!
//! This crate provides:
//! - Note and user identifier newtypes
//! - The `Note` domain type with its input forms (`NoteDraft`, `NotePatch`)
//! - Field validation (`ValidationError`)
//! - Study-guide types returned by the AI layer
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

pub mod study;
pub mod types;

pub use study::{Flashcard, QuizQuestion, StudyGuide, StudyGuideError};
pub use types::{
    MAX_TITLE_CHARS, Note, NoteDraft, NoteId, NotePatch, UserId, ValidationError,
};
