//! Application state shared across handlers.

use std::sync::Arc;

use studynote_ai::GeminiClient;
use studynote_cache::NoteService;

use crate::config::ServerConfig;
use crate::events::NoteEventBroadcaster;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Cached note service (store behind an in-process cache).
    notes: NoteService,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// AI client for summaries and study guides.
    ai: Arc<GeminiClient>,
    /// Event broadcaster for SSE notifications.
    broadcaster: Arc<NoteEventBroadcaster>,
}

impl AppState {
    /// Create new application state.
    pub fn new(notes: NoteService, config: ServerConfig, ai: GeminiClient) -> Self {
        Self {
            notes,
            config: Arc::new(config),
            ai: Arc::new(ai),
            broadcaster: Arc::new(NoteEventBroadcaster::new()),
        }
    }

    /// Get a reference to the note service.
    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the AI client.
    pub fn ai(&self) -> &GeminiClient {
        &self.ai
    }

    /// Get a reference to the event broadcaster.
    pub fn broadcaster(&self) -> &Arc<NoteEventBroadcaster> {
        &self.broadcaster
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
