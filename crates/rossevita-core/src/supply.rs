use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A consumable purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub supplier: String,
    pub purchase_date: Option<NaiveDate>,
    /// Employee who registered the purchase.
    pub employee: String,
}
