//! Server-Sent Events (SSE) endpoint for real-time note notifications.
//!
//! Endpoint: GET /api/events
//!
//! The stream is scoped to the authenticated user. Events:
//!
//! - `note`: a note was created, updated, deleted, or summarized
//! - `heartbeat`: sent every 30 seconds to keep the connection alive
//! - `catchup`: sent when the client falls behind; the client should
//!   refetch its note list
//!
//! ```text
//! event: note
//! data: {"type":"note","note_id":"...","operation":"created","timestamp":"..."}
//!
//! event: heartbeat
//! data: {"type":"heartbeat","timestamp":"..."}
//! ```

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use chrono::Utc;
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::events::{CatchupEvent, HEARTBEAT_INTERVAL_SECS, HeartbeatEvent, NoteEvent};
use crate::state::AppState;

/// GET /api/events - Subscribe to real-time note events for the caller.
///
/// If a client falls behind (channel buffer overflows), a `catchup` event
/// is sent indicating how many events were missed. The client should then
/// refetch its note list.
async fn subscribe_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let broadcaster = state.broadcaster();
    let receiver = broadcaster.subscribe(user.user_id).await;

    tracing::info!(user_id = %user.user_id, "Client subscribed to SSE events");

    let user_id = user.user_id;
    let stream = stream::unfold(receiver, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let event_type = match &event {
                        NoteEvent::Note(_) => "note",
                        NoteEvent::Heartbeat(_) => "heartbeat",
                        NoteEvent::Catchup(_) => "catchup",
                    };

                    match serde_json::to_string(&event) {
                        Ok(data) => {
                            let sse_event = Event::default().event(event_type).data(data);
                            return Some((Ok(sse_event), rx));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize event");
                            continue;
                        }
                    }
                }
                Err(RecvError::Lagged(count)) => {
                    // Client fell behind - tell it to refetch
                    tracing::warn!(
                        user_id = %user_id,
                        events_missed = count,
                        "SSE client lagged, sending catchup event"
                    );

                    let catchup = NoteEvent::Catchup(CatchupEvent {
                        events_missed: count,
                        timestamp: Utc::now(),
                    });

                    match serde_json::to_string(&catchup) {
                        Ok(data) => {
                            let sse_event = Event::default().event("catchup").data(data);
                            return Some((Ok(sse_event), rx));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize catchup event");
                            continue;
                        }
                    }
                }
                Err(RecvError::Closed) => {
                    tracing::debug!(user_id = %user_id, "Event channel closed, ending SSE stream");
                    return None;
                }
            }
        }
    });

    let keep_alive = KeepAlive::new()
        .interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS))
        .event(
            Event::default().event("heartbeat").data(
                serde_json::to_string(&NoteEvent::Heartbeat(HeartbeatEvent {
                    timestamp: Utc::now(),
                }))
                .unwrap_or_else(|_| r#"{"type":"heartbeat","timestamp":"unknown"}"#.to_string()),
            ),
        );

    Ok(Sse::new(stream).keep_alive(keep_alive))
}

/// Build SSE event routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/events", get(subscribe_events))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_interval() {
        assert_eq!(HEARTBEAT_INTERVAL_SECS, 30);
    }
}
