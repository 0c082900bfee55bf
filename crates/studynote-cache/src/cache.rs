//! Keyed in-memory cache of note query results.
//!
//! The cache holds one slot per logical query: the full note list of a user
//! (`list:{user}`) and a single note (`detail:{note}`). Each slot carries
//! the last-known server value and a status flag. Mutations patch affected
//! slots in place; nothing here talks to the network or the database.
//!
//! ## Slot lifecycle
//!
//! ```text
//! Fresh --(invalidate)--> Stale --(begin refetch)--> Refetching --(store)--> Fresh
//! ```
//!
//! A Fresh slot may also be mutated directly by a successful
//! create/update/delete/summary-save without leaving Fresh (write-through).
//!
//! ## Example
//!
//! ```rust,ignore
//! let cache = NoteCache::new();
//! cache.store_list(user, notes);
//!
//! // Optimistic delete with recorded undo information
//! let pending = cache.begin_removal(&user, &note_id);
//! match store.delete_note(note_id.0, user.0).await {
//!     Ok(_) => cache.commit_removal(&pending),
//!     Err(_) => cache.abort_removal(pending),
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use studynote_core::{Note, NoteId, UserId};

/// Status of a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Slot matches the last-known server state and may be served.
    Fresh,
    /// Slot has been invalidated; the next read must refetch.
    Stale,
    /// A refetch for this slot is in flight.
    Refetching,
}

/// A cached list query result.
#[derive(Debug, Clone)]
struct ListSlot {
    notes: Vec<Note>,
    status: CacheStatus,
}

/// A cached single-note query result.
#[derive(Debug, Clone)]
struct DetailSlot {
    note: Note,
    status: CacheStatus,
}

/// Undo record for an optimistic removal.
///
/// Captures the removed note and its position in the caller's list slot,
/// so a failed delete can be reversed exactly. The removal is scoped to
/// the user who requested it; other users' slots are never touched.
#[derive(Debug)]
pub struct PendingRemoval {
    user_id: UserId,
    note_id: NoteId,
    removed: Option<(usize, Note)>,
}

impl PendingRemoval {
    /// The note this removal targets.
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// True if the note was present in the caller's list slot.
    pub fn was_cached(&self) -> bool {
        self.removed.is_some()
    }
}

/// Thread-safe keyed cache of note query results.
///
/// Cloning is cheap and clones share state, so the cache can be handed to
/// every request handler. Handlers only read; all writes go through the
/// mutation methods below.
#[derive(Debug, Clone, Default)]
pub struct NoteCache {
    lists: Arc<RwLock<HashMap<UserId, ListSlot>>>,
    details: Arc<RwLock<HashMap<NoteId, DetailSlot>>>,
}

impl NoteCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns the user's note list if the slot is Fresh.
    pub fn fresh_list(&self, user: &UserId) -> Option<Vec<Note>> {
        let lists = self.lists.read().ok()?;
        let slot = lists.get(user)?;
        if slot.status == CacheStatus::Fresh {
            Some(slot.notes.clone())
        } else {
            None
        }
    }

    /// Returns a note if its detail slot is Fresh.
    pub fn fresh_detail(&self, id: &NoteId) -> Option<Note> {
        let details = self.details.read().ok()?;
        let slot = details.get(id)?;
        if slot.status == CacheStatus::Fresh {
            Some(slot.note.clone())
        } else {
            None
        }
    }

    /// Status of a user's list slot, if one exists.
    pub fn list_status(&self, user: &UserId) -> Option<CacheStatus> {
        self.lists.read().ok()?.get(user).map(|s| s.status)
    }

    /// Status of a note's detail slot, if one exists.
    pub fn detail_status(&self, id: &NoteId) -> Option<CacheStatus> {
        self.details.read().ok()?.get(id).map(|s| s.status)
    }

    // ========================================================================
    // Refetch lifecycle
    // ========================================================================

    /// Stores a freshly fetched list, marking the slot Fresh.
    pub fn store_list(&self, user: UserId, notes: Vec<Note>) {
        if let Ok(mut lists) = self.lists.write() {
            lists.insert(
                user,
                ListSlot {
                    notes,
                    status: CacheStatus::Fresh,
                },
            );
        }
    }

    /// Stores a freshly fetched note, marking its detail slot Fresh.
    pub fn store_detail(&self, note: Note) {
        if let Ok(mut details) = self.details.write() {
            details.insert(
                note.id,
                DetailSlot {
                    note,
                    status: CacheStatus::Fresh,
                },
            );
        }
    }

    /// Marks an existing list slot Refetching. Returns whether a slot existed.
    pub fn begin_list_refetch(&self, user: &UserId) -> bool {
        if let Ok(mut lists) = self.lists.write() {
            if let Some(slot) = lists.get_mut(user) {
                slot.status = CacheStatus::Refetching;
                return true;
            }
        }
        false
    }

    /// Marks an existing detail slot Refetching. Returns whether a slot existed.
    pub fn begin_detail_refetch(&self, id: &NoteId) -> bool {
        if let Ok(mut details) = self.details.write() {
            if let Some(slot) = details.get_mut(id) {
                slot.status = CacheStatus::Refetching;
                return true;
            }
        }
        false
    }

    /// Marks a list slot Stale; its value stays as last-known-good.
    pub fn invalidate_list(&self, user: &UserId) -> bool {
        if let Ok(mut lists) = self.lists.write() {
            if let Some(slot) = lists.get_mut(user) {
                slot.status = CacheStatus::Stale;
                return true;
            }
        }
        false
    }

    /// Marks a detail slot Stale; its value stays as last-known-good.
    pub fn invalidate_detail(&self, id: &NoteId) -> bool {
        if let Ok(mut details) = self.details.write() {
            if let Some(slot) = details.get_mut(id) {
                slot.status = CacheStatus::Stale;
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Mutation write-through
    // ========================================================================

    /// Applies a successful create: the new note is prepended to the
    /// owner's list slot, if one is populated. A created note is assumed
    /// most-recent, so no re-sort happens. Detail slots of other notes are
    /// untouched and no slot is created for an owner who has never listed.
    pub fn apply_created(&self, note: &Note) {
        if let Ok(mut lists) = self.lists.write() {
            if let Some(slot) = lists.get_mut(&note.user_id) {
                slot.notes.insert(0, note.clone());
            }
        }
    }

    /// Applies a successful update: the matching note in the owner's list
    /// slot is replaced and the list re-sorted by `updated_at` descending
    /// (the update moved the note to the newest timestamp); the detail slot
    /// is overwritten with the new value.
    pub fn apply_updated(&self, note: &Note) {
        if let Ok(mut lists) = self.lists.write() {
            if let Some(slot) = lists.get_mut(&note.user_id) {
                slot.notes.retain(|n| n.id != note.id);
                slot.notes.push(note.clone());
                slot.notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            }
        }
        self.store_detail(note.clone());
    }

    /// First phase of an optimistic delete: removes the note from the
    /// caller's list slot immediately, recording the removal so it can be
    /// reversed. Only the caller's slot is touched; a note has exactly one
    /// owner, so a non-owner's delete removes nothing here. Detail slots
    /// are left alone until the store confirms.
    pub fn begin_removal(&self, user: &UserId, id: &NoteId) -> PendingRemoval {
        let mut removed = None;
        if let Ok(mut lists) = self.lists.write() {
            if let Some(slot) = lists.get_mut(user) {
                if let Some(pos) = slot.notes.iter().position(|n| n.id == *id) {
                    removed = Some((pos, slot.notes.remove(pos)));
                }
            }
        }
        PendingRemoval {
            user_id: *user,
            note_id: *id,
            removed,
        }
    }

    /// Second phase on success: the list removal stands and the detail
    /// slot is purged, but only if the cached note belongs to the user who
    /// started the removal. A detail slot cached for a different owner is
    /// left intact.
    pub fn commit_removal(&self, pending: &PendingRemoval) {
        if let Ok(mut details) = self.details.write() {
            let owned = details
                .get(&pending.note_id)
                .is_some_and(|s| s.note.user_id == pending.user_id);
            if owned {
                details.remove(&pending.note_id);
            }
        }
    }

    /// Second phase on failure: the recorded note is restored at its
    /// recorded position in the caller's slot, and the affected slots are
    /// marked Stale so the next read resynchronizes with the store.
    pub fn abort_removal(&self, pending: PendingRemoval) {
        if let Some((pos, note)) = pending.removed {
            if let Ok(mut lists) = self.lists.write() {
                if let Some(slot) = lists.get_mut(&pending.user_id) {
                    let pos = pos.min(slot.notes.len());
                    slot.notes.insert(pos, note);
                    slot.status = CacheStatus::Stale;
                }
            }
        }
        if let Ok(mut details) = self.details.write() {
            if let Some(slot) = details.get_mut(&pending.note_id) {
                if slot.note.user_id == pending.user_id {
                    slot.status = CacheStatus::Stale;
                }
            }
        }
    }

    /// Applies a saved summary to every slot containing the note: the
    /// detail slot and each list slot element are patched in place. List
    /// positions are preserved (a just-revealed summary should not make
    /// the note jump around). Returns the number of locations patched.
    pub fn apply_summary(
        &self,
        id: &NoteId,
        summary: &str,
        updated_at: DateTime<Utc>,
    ) -> usize {
        let mut patched = 0;

        if let Ok(mut lists) = self.lists.write() {
            for slot in lists.values_mut() {
                for note in slot.notes.iter_mut().filter(|n| n.id == *id) {
                    note.summary = Some(summary.to_string());
                    note.updated_at = updated_at;
                    patched += 1;
                }
            }
        }

        if let Ok(mut details) = self.details.write() {
            if let Some(slot) = details.get_mut(id) {
                slot.note.summary = Some(summary.to_string());
                slot.note.updated_at = updated_at;
                patched += 1;
            }
        }

        patched
    }

    /// Drops every slot.
    pub fn clear(&self) {
        if let Ok(mut lists) = self.lists.write() {
            lists.clear();
        }
        if let Ok(mut details) = self.details.write() {
            details.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_note(user: UserId, title: &str, age_secs: i64) -> Note {
        let at = Utc::now() - Duration::seconds(age_secs);
        Note {
            id: NoteId::new(),
            user_id: user,
            title: title.to_string(),
            content: format!("<p>{}</p>", title),
            summary: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn fresh_list_served() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let notes = vec![make_note(user, "a", 10), make_note(user, "b", 20)];

        cache.store_list(user, notes.clone());

        let served = cache.fresh_list(&user).unwrap();
        assert_eq!(served.len(), 2);
        assert_eq!(served[0].title, "a");
        assert_eq!(cache.list_status(&user), Some(CacheStatus::Fresh));
    }

    #[test]
    fn stale_list_not_served() {
        let cache = NoteCache::new();
        let user = UserId::new();
        cache.store_list(user, vec![make_note(user, "a", 10)]);

        assert!(cache.invalidate_list(&user));
        assert!(cache.fresh_list(&user).is_none());
        assert_eq!(cache.list_status(&user), Some(CacheStatus::Stale));
    }

    #[test]
    fn refetching_list_not_served() {
        let cache = NoteCache::new();
        let user = UserId::new();
        cache.store_list(user, vec![make_note(user, "a", 10)]);

        assert!(cache.begin_list_refetch(&user));
        assert!(cache.fresh_list(&user).is_none());

        // refetch completes
        cache.store_list(user, vec![]);
        assert_eq!(cache.fresh_list(&user).unwrap().len(), 0);
    }

    #[test]
    fn begin_refetch_without_slot_is_noop() {
        let cache = NoteCache::new();
        assert!(!cache.begin_list_refetch(&UserId::new()));
        assert!(!cache.begin_detail_refetch(&NoteId::new()));
    }

    #[test]
    fn created_note_prepended_at_index_zero() {
        let cache = NoteCache::new();
        let user = UserId::new();
        cache.store_list(user, vec![make_note(user, "old", 60)]);

        let new = make_note(user, "new", 0);
        cache.apply_created(&new);

        let list = cache.fresh_list(&user).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, new.id);
        assert_eq!(list[0].title, "new");
    }

    #[test]
    fn create_does_not_materialize_missing_list_slot() {
        let cache = NoteCache::new();
        let note = make_note(UserId::new(), "new", 0);

        cache.apply_created(&note);

        assert!(cache.list_status(&note.user_id).is_none());
        assert!(cache.detail_status(&note.id).is_none());
    }

    #[test]
    fn updated_note_replaced_and_moved_to_front() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let a = make_note(user, "a", 30);
        let b = make_note(user, "b", 60);
        cache.store_list(user, vec![a.clone(), b.clone()]);

        let mut b2 = b.clone();
        b2.title = "b-edited".to_string();
        b2.updated_at = Utc::now();
        cache.apply_updated(&b2);

        let list = cache.fresh_list(&user).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, b.id);
        assert_eq!(list[0].title, "b-edited");
        assert_eq!(list[1].id, a.id);
    }

    #[test]
    fn update_overwrites_detail_slot() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let note = make_note(user, "a", 30);
        cache.store_detail(note.clone());

        let mut edited = note.clone();
        edited.content = "<p>edited</p>".to_string();
        edited.updated_at = Utc::now();
        cache.apply_updated(&edited);

        let detail = cache.fresh_detail(&note.id).unwrap();
        assert_eq!(detail.content, "<p>edited</p>");
        assert!(detail.updated_at > note.updated_at);
    }

    #[test]
    fn removal_commit_purges_everywhere() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let a = make_note(user, "a", 10);
        let b = make_note(user, "b", 20);
        cache.store_list(user, vec![a.clone(), b.clone()]);
        cache.store_detail(a.clone());

        let pending = cache.begin_removal(&user, &a.id);
        assert!(pending.was_cached());

        // optimistic: gone from the list before any confirmation
        let list = cache.fresh_list(&user).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, b.id);
        // detail untouched until commit
        assert!(cache.fresh_detail(&a.id).is_some());

        cache.commit_removal(&pending);
        assert!(cache.detail_status(&a.id).is_none());
        assert_eq!(cache.fresh_list(&user).unwrap().len(), 1);
    }

    #[test]
    fn removal_abort_restores_position_and_marks_stale() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let a = make_note(user, "a", 10);
        let b = make_note(user, "b", 20);
        let c = make_note(user, "c", 30);
        cache.store_list(user, vec![a.clone(), b.clone(), c.clone()]);

        let pending = cache.begin_removal(&user, &b.id);
        assert_eq!(cache.fresh_list(&user).unwrap().len(), 2);

        cache.abort_removal(pending);

        // restored at its original position, but the slot is now Stale
        assert_eq!(cache.list_status(&user), Some(CacheStatus::Stale));
        assert!(cache.fresh_list(&user).is_none());

        let refreshed = {
            // peek by refetching through store_list with the same value
            cache.begin_list_refetch(&user);
            cache.store_list(user, vec![a.clone(), b.clone(), c.clone()]);
            cache.fresh_list(&user).unwrap()
        };
        assert_eq!(refreshed[1].id, b.id);
    }

    #[test]
    fn removal_of_uncached_note_is_harmless() {
        let cache = NoteCache::new();
        let id = NoteId::new();

        let pending = cache.begin_removal(&UserId::new(), &id);
        assert!(!pending.was_cached());

        cache.commit_removal(&pending);
        assert!(cache.detail_status(&id).is_none());
    }

    #[test]
    fn removal_by_non_owner_leaves_owner_cache_intact() {
        let cache = NoteCache::new();
        let owner = UserId::new();
        let other = UserId::new();
        let note = make_note(owner, "a", 10);
        cache.store_list(owner, vec![note.clone()]);
        cache.store_detail(note.clone());

        // the full removal sequence a delete of someone else's note runs
        let pending = cache.begin_removal(&other, &note.id);
        assert!(!pending.was_cached());
        cache.commit_removal(&pending);

        // the owner's Fresh slots still hold the live note
        let list = cache.fresh_list(&owner).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, note.id);
        assert!(cache.fresh_detail(&note.id).is_some());
    }

    #[test]
    fn abort_by_non_owner_does_not_stale_owner_detail() {
        let cache = NoteCache::new();
        let owner = UserId::new();
        let other = UserId::new();
        let note = make_note(owner, "a", 10);
        cache.store_detail(note.clone());

        let pending = cache.begin_removal(&other, &note.id);
        cache.abort_removal(pending);

        assert_eq!(cache.detail_status(&note.id), Some(CacheStatus::Fresh));
    }

    #[test]
    fn summary_patched_in_list_and_detail() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let a = make_note(user, "a", 10);
        let b = make_note(user, "b", 20);
        cache.store_list(user, vec![a.clone(), b.clone()]);
        cache.store_detail(a.clone());

        let now = Utc::now();
        let patched = cache.apply_summary(&a.id, "Short summary.", now);
        assert_eq!(patched, 2);

        let detail = cache.fresh_detail(&a.id).unwrap();
        let list = cache.fresh_list(&user).unwrap();
        let in_list = list.iter().find(|n| n.id == a.id).unwrap();

        // identical summary string in both locations
        assert_eq!(detail.summary.as_deref(), Some("Short summary."));
        assert_eq!(in_list.summary, detail.summary);
        assert_eq!(in_list.updated_at, now);
    }

    #[test]
    fn summary_patch_preserves_list_position() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let a = make_note(user, "a", 10);
        let b = make_note(user, "b", 20);
        cache.store_list(user, vec![a.clone(), b.clone()]);

        cache.apply_summary(&b.id, "s", Utc::now());

        let list = cache.fresh_list(&user).unwrap();
        assert_eq!(list[1].id, b.id, "patched note must not move");
    }

    #[test]
    fn summary_patch_on_uncached_note_patches_nothing() {
        let cache = NoteCache::new();
        assert_eq!(cache.apply_summary(&NoteId::new(), "s", Utc::now()), 0);
    }

    #[test]
    fn clone_shares_state() {
        let cache1 = NoteCache::new();
        let cache2 = cache1.clone();
        let user = UserId::new();

        cache1.store_list(user, vec![make_note(user, "a", 10)]);

        assert!(cache2.fresh_list(&user).is_some());
    }

    #[test]
    fn clear_drops_all_slots() {
        let cache = NoteCache::new();
        let user = UserId::new();
        let note = make_note(user, "a", 10);
        cache.store_list(user, vec![note.clone()]);
        cache.store_detail(note.clone());

        cache.clear();

        assert!(cache.list_status(&user).is_none());
        assert!(cache.detail_status(&note.id).is_none());
    }
}
