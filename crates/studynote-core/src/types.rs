//! Core data types for notes and their owners.
//!
//! A note is the central user-owned entity: a title, a rich-text (HTML)
//! body, and an optional AI-generated summary. Identifiers and timestamps
//! are assigned by the store, never by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum length of a note title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Wraps a UUID v4, providing type safety to distinguish note IDs from other
/// UUID-based identifiers in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a user (the owner of notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random UserId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Note
// ============================================================================

/// A user-owned note.
///
/// Invariants (enforced by the store and validation):
/// - `id` is immutable and globally unique
/// - the note belongs to exactly one owner
/// - `updated_at` is refreshed on every successful mutation
/// - on creation `created_at == updated_at` and `summary` is `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique note identifier.
    pub id: NoteId,
    /// Owner of the note.
    pub user_id: UserId,
    /// Title, non-empty and at most [`MAX_TITLE_CHARS`] characters.
    pub title: String,
    /// Rich-text (HTML) body, non-empty.
    pub content: String,
    /// AI-generated summary, absent until one is saved.
    pub summary: Option<String>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned timestamp of the last successful mutation.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note. Validated before it reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validate the draft: both fields required, title length bounded.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

/// Partial update for a note. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Validate whichever fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let chars = title.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong(chars));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

/// Validation failures for note input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    #[error("note title cannot be empty")]
    EmptyTitle,

    /// Title exceeds [`MAX_TITLE_CHARS`] characters.
    #[error("note title too long: {0} characters (max {MAX_TITLE_CHARS})")]
    TitleTooLong(usize),

    /// Content is empty or whitespace-only.
    #[error("note content cannot be empty")]
    EmptyContent,

    /// A patch with no fields set.
    #[error("update must change at least one field")]
    EmptyPatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_roundtrip() {
        let id = NoteId::new();
        let parsed: NoteId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn note_id_serde_transparent() {
        let id = NoteId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn draft_valid() {
        let draft = NoteDraft::new("Photosynthesis", "<p>Light reactions</p>");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_empty_title_rejected() {
        let draft = NoteDraft::new("   ", "<p>body</p>");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn draft_empty_content_rejected() {
        let draft = NoteDraft::new("Title", "");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn draft_title_too_long_rejected() {
        let draft = NoteDraft::new("x".repeat(101), "<p>body</p>");
        assert_eq!(draft.validate(), Err(ValidationError::TitleTooLong(101)));
    }

    #[test]
    fn draft_title_at_limit_accepted() {
        let draft = NoteDraft::new("x".repeat(100), "<p>body</p>");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn patch_empty_rejected() {
        let patch = NotePatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.validate(), Err(ValidationError::EmptyPatch));
    }

    #[test]
    fn patch_partial_fields_validated() {
        let patch = NotePatch {
            title: Some("".to_string()),
            content: None,
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyTitle));

        let patch = NotePatch {
            title: None,
            content: Some("<p>new body</p>".to_string()),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn note_serde_roundtrip() {
        let note = Note {
            id: NoteId::new(),
            user_id: UserId::new(),
            title: "T".to_string(),
            content: "C".to_string(),
            summary: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note, back);
    }
}
