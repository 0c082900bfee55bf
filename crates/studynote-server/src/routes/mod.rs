//! Route definitions for the HTTP API.

pub mod ai;
pub mod auth;
pub mod events;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(notes::routes())
        .merge(ai::routes())
        .merge(events::routes())
        .with_state(state)
}
