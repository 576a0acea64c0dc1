use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default event types seeded on first use; clients may edit the list.
pub const DEFAULT_EVENT_TYPES: &[&str] = &[
    "Casamientos",
    "Cumpleaños",
    "Fiestas de 15",
    "Brindis de fin de año",
    "Eventos corporativos",
    "Egresados",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
