//! Note actions layered over the cache and the store.
//!
//! `NoteService` is the single writer of the cache: handlers read through
//! it and every mutation reconciles the affected slots synchronously on
//! success, so no two views of a note can disagree after an action
//! returns. Failures leave slots in their last-known-good state, except
//! the delete path, whose optimistic removal is explicitly reversed.

use studynote_core::{Note, NoteDraft, NoteId, NotePatch, UserId};
use studynote_store::{NewNote, Store};

use crate::cache::NoteCache;
use crate::error::{ActionError, ActionResult};

/// Note actions with cache reconciliation.
///
/// Wraps the raw [`Store`] with domain types and keeps the [`NoteCache`]
/// consistent across create/update/delete/summary mutations.
#[derive(Debug, Clone)]
pub struct NoteService {
    store: Store,
    cache: NoteCache,
}

impl NoteService {
    /// Create a service with its own empty cache.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            cache: NoteCache::new(),
        }
    }

    /// Create a service sharing an existing cache.
    pub fn with_cache(store: Store, cache: NoteCache) -> Self {
        Self { store, cache }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get a reference to the cache.
    pub fn cache(&self) -> &NoteCache {
        &self.cache
    }

    /// List the user's notes, most recently updated first.
    ///
    /// Serves the Fresh list slot without a store round-trip; otherwise
    /// refetches and repopulates the slot.
    pub async fn list(&self, user: UserId) -> ActionResult<Vec<Note>> {
        if let Some(notes) = self.cache.fresh_list(&user) {
            tracing::debug!(user_id = %user, count = notes.len(), "note list served from cache");
            return Ok(notes);
        }

        self.cache.begin_list_refetch(&user);
        let rows = match self.store.list_notes(user.0).await {
            Ok(rows) => rows,
            Err(e) => {
                // leave the slot Stale with its last-known-good value
                self.cache.invalidate_list(&user);
                return Err(e.into());
            }
        };

        let notes: Vec<Note> = rows.into_iter().map(|r| r.into_note()).collect();
        self.cache.store_list(user, notes.clone());
        tracing::debug!(user_id = %user, count = notes.len(), "note list refetched");
        Ok(notes)
    }

    /// Get a single note owned by the user.
    pub async fn get(&self, user: UserId, id: NoteId) -> ActionResult<Note> {
        if let Some(note) = self.cache.fresh_detail(&id) {
            if note.user_id == user {
                tracing::debug!(note_id = %id, "note served from cache");
                return Ok(note);
            }
            // cached under a different owner: fall through to the store,
            // which enforces ownership in SQL
        }

        self.cache.begin_detail_refetch(&id);
        let row = match self.store.get_note(id.0, user.0).await {
            Ok(row) => row,
            Err(e) => {
                self.cache.invalidate_detail(&id);
                return Err(e.into());
            }
        };

        let note = row.into_note();
        self.cache.store_detail(note.clone());
        Ok(note)
    }

    /// Create a note from a draft.
    ///
    /// On success the new note is prepended to the owner's list slot with
    /// no refetch.
    pub async fn create(&self, user: UserId, draft: NoteDraft) -> ActionResult<Note> {
        draft.validate()?;

        let row = self
            .store
            .insert_note(&NewNote::from_draft(user, draft))
            .await?;

        let note = row.into_note();
        self.cache.apply_created(&note);

        tracing::info!(note_id = %note.id, user_id = %user, "note created");
        Ok(note)
    }

    /// Apply a partial update to a note.
    ///
    /// On success the list slot entry is replaced (and re-ordered by
    /// `updated_at`) and the detail slot overwritten.
    pub async fn update(&self, user: UserId, id: NoteId, patch: NotePatch) -> ActionResult<Note> {
        patch.validate()?;

        let row = self.store.update_note(id.0, user.0, &patch.into()).await?;

        let note = row.into_note();
        self.cache.apply_updated(&note);

        tracing::info!(note_id = %id, user_id = %user, "note updated");
        Ok(note)
    }

    /// Delete a note.
    ///
    /// The note is removed from the caller's list slot optimistically,
    /// before the store confirms; slots belonging to other users are
    /// never touched, so deleting a note you don't own changes nothing.
    /// If the store reports the row already gone, the removal stands and
    /// `NotFound` is returned (a second delete never corrupts state). If
    /// the store *fails*, the removal is reversed and the affected slots
    /// are marked Stale for resynchronization.
    pub async fn delete(&self, user: UserId, id: NoteId) -> ActionResult<()> {
        let pending = self.cache.begin_removal(&user, &id);

        match self.store.delete_note(id.0, user.0).await {
            Ok(true) => {
                self.cache.commit_removal(&pending);
                tracing::info!(note_id = %id, user_id = %user, "note deleted");
                Ok(())
            }
            Ok(false) => {
                // already gone server-side; keep the cache note-free
                self.cache.commit_removal(&pending);
                Err(ActionError::NotFound(id))
            }
            Err(e) => {
                tracing::warn!(
                    note_id = %id,
                    error = %e,
                    "delete failed, reversing optimistic removal"
                );
                self.cache.abort_removal(pending);
                Err(e.into())
            }
        }
    }

    /// Save an AI-generated summary onto a note.
    ///
    /// On success the summary is patched into the detail slot and every
    /// list slot containing the note, in place. No slot is refetched.
    pub async fn save_summary(
        &self,
        user: UserId,
        id: NoteId,
        summary: &str,
    ) -> ActionResult<Note> {
        let row = self.store.save_summary(id.0, user.0, summary).await?;

        let note = row.into_note();
        let patched = self.cache.apply_summary(&id, summary, note.updated_at);

        tracing::info!(note_id = %id, locations = patched, "summary saved");
        Ok(note)
    }
}

// ============================================================================
// Integration tests (require a real database)
// ============================================================================
