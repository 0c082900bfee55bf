//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx queries.
//! They are separate from the domain types in studynote-core; `NoteRow`
//! converts into a domain `Note` at the storage boundary.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use studynote_core::{Note, NoteDraft, NoteId, NotePatch, UserId};

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRow {
    /// Convert into the domain type.
    pub fn into_note(self) -> Note {
        Note {
            id: NoteId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            content: self.content,
            summary: self.summary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new note. Id and timestamps are assigned by the
/// database.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
}

impl NewNote {
    /// Build from a validated draft and its owner.
    pub fn from_draft(user_id: UserId, draft: NoteDraft) -> Self {
        Self {
            user_id: user_id.0,
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Field changes for an update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<NotePatch> for NoteChanges {
    fn from(patch: NotePatch) -> Self {
        Self {
            title: patch.title,
            content: patch.content,
        }
    }
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_row_into_note() {
        let now = Utc::now();
        let row = NoteRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            summary: None,
            created_at: now,
            updated_at: now,
        };
        let id = row.id;
        let note = row.into_note();
        assert_eq!(note.id.0, id);
        assert_eq!(note.title, "T");
        assert!(note.summary.is_none());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn new_note_from_draft() {
        let user = UserId::new();
        let new_note = NewNote::from_draft(user, NoteDraft::new("T", "C"));
        assert_eq!(new_note.user_id, user.0);
        assert_eq!(new_note.title, "T");
    }

    #[test]
    fn changes_from_patch() {
        let changes: NoteChanges = NotePatch {
            title: Some("new".to_string()),
            content: None,
        }
        .into();
        assert_eq!(changes.title.as_deref(), Some("new"));
        assert!(changes.content.is_none());
    }
}
