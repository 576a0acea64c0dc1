use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rossevita_core::Employee;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/employees", get(list).put(replace))
}

async fn list(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.employees.load()))
}

async fn replace(
    State(state): State<AppState>,
    Json(employees): Json<Vec<Employee>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .employees
        .save(&employees)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| to_error(e.into()))
}
