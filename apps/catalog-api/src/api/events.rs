//! Event catalog routes

use crate::state::AppState;
use axum::Router;
use domain_events::events_router;

/// Mount the domain router over the service selected at startup
pub fn router(state: &AppState) -> Router {
    events_router(state.events.clone())
}
