use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rossevita_core::event::DEFAULT_EVENT_TYPES;
use rossevita_core::Event;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).put(replace_events))
        .route("/api/event-types", get(list_types).put(replace_types))
}

async fn list_events(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.events.load()))
}

async fn replace_events(
    State(state): State<AppState>,
    Json(events): Json<Vec<Event>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .events
        .save(&events)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}

/// The type list is seeded with the business defaults on first read and
/// freely editable afterwards.
async fn list_types(State(state): State<AppState>) -> Json<Value> {
    let types = state
        .event_types
        .load_or_seed(|| DEFAULT_EVENT_TYPES.iter().map(|t| t.to_string()).collect());
    Json(json!(types))
}

async fn replace_types(
    State(state): State<AppState>,
    Json(types): Json<Vec<String>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .event_types
        .save(&types)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}
