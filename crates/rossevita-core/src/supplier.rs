use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub cuit: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub category: String,
}
