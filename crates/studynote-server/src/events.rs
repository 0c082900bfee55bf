//! Event broadcasting for real-time note notifications.
//!
//! This module provides a pub/sub mechanism for broadcasting note change
//! events to connected SSE clients. Events are published after a note is
//! created, updated, deleted, or receives a summary, so clients can keep
//! their local views current without polling.
//!
//! # Architecture
//!
//! - Uses `tokio::sync::broadcast` for multi-subscriber pub/sub
//! - One channel per user (created lazily on first subscription)
//! - Channels are cleaned up when all subscribers disconnect

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{RwLock, broadcast};

use studynote_core::{NoteId, UserId};

/// Default channel capacity for broadcast channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Heartbeat interval in seconds.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;

// ============================================================================
// Event Types
// ============================================================================

/// An event that can be broadcast to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteEvent {
    /// A note was created, updated, deleted, or summarized.
    Note(NoteChangeEvent),
    /// Periodic heartbeat to keep connection alive.
    Heartbeat(HeartbeatEvent),
    /// Client fell behind and should refetch its note list.
    Catchup(CatchupEvent),
}

/// What happened to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteOperation {
    Created,
    Updated,
    Deleted,
    SummarySaved,
}

/// Event data for a note change.
#[derive(Debug, Clone, Serialize)]
pub struct NoteChangeEvent {
    /// The note ID.
    pub note_id: NoteId,
    /// What happened.
    pub operation: NoteOperation,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
}

/// Heartbeat event data.
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatEvent {
    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Catchup event sent when subscriber falls behind.
#[derive(Debug, Clone, Serialize)]
pub struct CatchupEvent {
    /// Number of events missed.
    pub events_missed: u64,
    /// Timestamp of the catchup event.
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Broadcaster
// ============================================================================

/// Manages broadcast channels for note events.
///
/// Each user has their own broadcast channel. Channels are created lazily
/// when the first subscriber connects and cleaned up when all subscribers
/// disconnect.
#[derive(Debug, Clone)]
pub struct NoteEventBroadcaster {
    /// Map of user_id -> broadcast sender.
    channels: Arc<RwLock<HashMap<UserId, broadcast::Sender<NoteEvent>>>>,
    /// Channel capacity for new channels.
    capacity: usize,
}

impl Default for NoteEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteEventBroadcaster {
    /// Create a new event broadcaster with default capacity.
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Create a new event broadcaster with custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribe to events for a user.
    ///
    /// Creates the channel if it doesn't exist.
    /// Returns a receiver that can be used to receive events.
    pub async fn subscribe(&self, user_id: UserId) -> broadcast::Receiver<NoteEvent> {
        // First try to get existing channel
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&user_id) {
                return sender.subscribe();
            }
        }

        // Create new channel
        let mut channels = self.channels.write().await;
        // Check again in case another task created it
        if let Some(sender) = channels.get(&user_id) {
            return sender.subscribe();
        }

        let (sender, receiver) = broadcast::channel(self.capacity);
        channels.insert(user_id, sender);

        tracing::debug!(
            user_id = %user_id,
            capacity = self.capacity,
            "Created event channel for user"
        );

        receiver
    }

    /// Publish an event to all subscribers of a user.
    ///
    /// Returns the number of receivers that received the event,
    /// or None if no channel exists for this user.
    pub async fn publish(&self, user_id: UserId, event: NoteEvent) -> Option<usize> {
        let channels = self.channels.read().await;
        if let Some(sender) = channels.get(&user_id) {
            match sender.send(event) {
                Ok(count) => {
                    tracing::trace!(
                        user_id = %user_id,
                        receivers = count,
                        "Published event to subscribers"
                    );
                    Some(count)
                }
                Err(_) => {
                    // No receivers - this is fine, channel will be cleaned up
                    tracing::trace!(user_id = %user_id, "No subscribers for event");
                    Some(0)
                }
            }
        } else {
            None
        }
    }

    /// Publish a note change event (convenience method).
    pub async fn publish_change(
        &self,
        user_id: UserId,
        note_id: NoteId,
        operation: NoteOperation,
    ) -> Option<usize> {
        let event = NoteEvent::Note(NoteChangeEvent {
            note_id,
            operation,
            timestamp: Utc::now(),
        });
        self.publish(user_id, event).await
    }

    /// Get the number of active channels.
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }

    /// Get the number of subscribers for a user.
    pub async fn subscriber_count(&self, user_id: UserId) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(&user_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Clean up channels with no subscribers.
    ///
    /// This can be called periodically to free up resources.
    pub async fn cleanup_empty_channels(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|id, sender| {
            let has_receivers = sender.receiver_count() > 0;
            if !has_receivers {
                tracing::debug!(user_id = %id, "Cleaning up empty event channel");
            }
            has_receivers
        });
        before - channels.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
