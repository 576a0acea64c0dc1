use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rossevita_core::Supplier;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suppliers", get(list).put(replace))
}

async fn list(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.suppliers.load()))
}

async fn replace(
    State(state): State<AppState>,
    Json(suppliers): Json<Vec<Supplier>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .suppliers
        .save(&suppliers)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}
