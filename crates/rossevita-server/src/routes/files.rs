use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/files/{bucket}/{*key}", get(serve_object))
}

/// Object passthrough for the local store backend; this is where derived
/// public URLs point when no public S3 endpoint is configured.
async fn serve_object(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    if bucket != state.attachments.bucket() {
        return Err(not_found(&bucket, &key));
    }
    match state.attachments.store().get(&key).await {
        Ok(data) => Ok((
            [(header::CONTENT_TYPE, rossevita_store::content_type_for_key(&key))],
            data,
        )
            .into_response()),
        Err(rossevita_store::StoreError::NotFound(_)) => Err(not_found(&bucket, &key)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

fn not_found(bucket: &str, key: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("not found: {bucket}/{key}") })),
    )
}
