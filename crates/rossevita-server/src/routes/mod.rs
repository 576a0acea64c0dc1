pub mod attachments;
pub mod employees;
pub mod events;
pub mod files;
pub mod health;
pub mod suppliers;
pub mod supplies;
pub mod venue_tasks;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use rossevita_core::{Employee, Event, Supplier, Supply, VenueTask};
use rossevita_local::JsonRepository;
use rossevita_service::{AttachmentService, ServiceError};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

/// Per-venue task lists, keyed by venue slug.
pub type VenueTaskMap = HashMap<String, Vec<VenueTask>>;

pub struct InnerAppState {
    pub attachments: AttachmentService,
    pub employees: JsonRepository<Vec<Employee>>,
    pub suppliers: JsonRepository<Vec<Supplier>>,
    pub supplies: JsonRepository<Vec<Supply>>,
    pub events: JsonRepository<Vec<Event>>,
    pub event_types: JsonRepository<Vec<String>>,
    pub venue_tasks: JsonRepository<VenueTaskMap>,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(attachments::routes())
        .merge(files::routes())
        .merge(employees::routes())
        .merge(suppliers::routes())
        .merge(supplies::routes())
        .merge(events::routes())
        .merge(venue_tasks::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) fn to_error(e: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, msg) = match &e {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": msg })))
}
