use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/attachments", get(list_attachments).post(upload))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    group: Option<String>,
}

/// Reconcile the three sources and return the merged listing, optionally
/// narrowed to one group tab. Source failures never surface here; the
/// worst case is an incomplete list.
async fn list_attachments(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Json<Value> {
    let records = state.attachments.list(q.group.as_deref()).await;
    Json(json!(records))
}

#[derive(Debug, Deserialize)]
struct UploadQuery {
    file_name: String,
    mime_type: Option<String>,
    group: Option<String>,
}

async fn upload(
    State(state): State<AppState>,
    Query(q): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mime_type = q.mime_type.as_deref().unwrap_or("application/octet-stream");
    state
        .attachments
        .upload(&q.file_name, mime_type, q.group, body)
        .await
        .map(|record| (StatusCode::CREATED, Json(json!(record))))
        .map_err(to_error)
}
