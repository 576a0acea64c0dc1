use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rossevita_core::venue::DEFAULT_VENUES;
use rossevita_core::VenueTask;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/venues", get(list_venues))
        .route("/api/venues/{venue}/tasks", get(list_tasks).put(replace_tasks))
}

/// The known venue slugs: the three business defaults plus any venue a
/// client has written tasks under.
async fn list_venues(State(state): State<AppState>) -> Json<Value> {
    let map = state.venue_tasks.load();
    let mut venues: Vec<String> = DEFAULT_VENUES.iter().map(|v| v.to_string()).collect();
    for venue in map.keys() {
        if !venues.iter().any(|v| v == venue) {
            venues.push(venue.clone());
        }
    }
    Json(json!(venues))
}

async fn list_tasks(
    State(state): State<AppState>,
    Path(venue): Path<String>,
) -> Json<Value> {
    let map = state.venue_tasks.load();
    let tasks = map.get(&venue).cloned().unwrap_or_default();
    Json(json!(tasks))
}

async fn replace_tasks(
    State(state): State<AppState>,
    Path(venue): Path<String>,
    Json(tasks): Json<Vec<VenueTask>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut map = state.venue_tasks.load();
    map.insert(venue, tasks);
    state
        .venue_tasks
        .save(&map)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}
