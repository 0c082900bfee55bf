//! Note routes: list, create, read, update, delete, save summary.
//!
//! Every handler goes through the cached note service, so reads are served
//! from the in-process cache when it is fresh and every write reconciles
//! the cache before the response is sent. Successful writes also publish a
//! change event for SSE subscribers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use uuid::Uuid;

use studynote_core::{Note, NoteDraft, NoteId, NotePatch};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::events::NoteOperation;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSummaryRequest {
    pub summary: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/notes - List the caller's notes, newest-updated first.
async fn list_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = state.notes().list(user.user_id).await?;
    Ok(Json(notes))
}

/// POST /api/notes - Create a note.
async fn create_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let draft = NoteDraft::new(request.title, request.content);
    let note = state.notes().create(user.user_id, draft).await?;

    state
        .broadcaster()
        .publish_change(user.user_id, note.id, NoteOperation::Created)
        .await;

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes/{id} - Fetch one note.
async fn get_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let note = state
        .notes()
        .get(user.user_id, NoteId::from_uuid(id))
        .await?;
    Ok(Json(note))
}

/// PUT /api/notes/{id} - Update title and/or content.
async fn update_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let patch = NotePatch {
        title: request.title,
        content: request.content,
    };
    let note = state
        .notes()
        .update(user.user_id, NoteId::from_uuid(id), patch)
        .await?;

    state
        .broadcaster()
        .publish_change(user.user_id, note.id, NoteOperation::Updated)
        .await;

    Ok(Json(note))
}

/// DELETE /api/notes/{id} - Delete a note.
async fn delete_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let note_id = NoteId::from_uuid(id);
    state.notes().delete(user.user_id, note_id).await?;

    state
        .broadcaster()
        .publish_change(user.user_id, note_id, NoteOperation::Deleted)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/notes/{id}/summary - Save an AI-generated summary onto a note.
async fn save_summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveSummaryRequest>,
) -> ApiResult<Json<Note>> {
    let summary = request.summary.trim();
    if summary.is_empty() {
        return Err(ApiError::BadRequest("Summary must not be empty".to_string()));
    }

    let note_id = NoteId::from_uuid(id);
    let note = state
        .notes()
        .save_summary(user.user_id, note_id, summary)
        .await?;

    state
        .broadcaster()
        .publish_change(user.user_id, note_id, NoteOperation::SummarySaved)
        .await;

    Ok(Json(note))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/notes/{id}/summary", put(save_summary))
}
