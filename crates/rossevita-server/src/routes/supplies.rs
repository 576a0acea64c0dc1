use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rossevita_core::Supply;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/supplies", get(list).put(replace))
}

async fn list(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.supplies.load()))
}

async fn replace(
    State(state): State<AppState>,
    Json(supplies): Json<Vec<Supply>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .supplies
        .save(&supplies)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}
