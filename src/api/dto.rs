//! Data Transfer Objects
//!
//! Response types for the API endpoints. The ingestion payload itself is
//! [`NewDrink`](crate::store::NewDrink) and the listing entries are
//! [`DrinkRecord`](crate::store::DrinkRecord), both shared with the store.

use serde::{Deserialize, Serialize};

use crate::store::NewDrink;

/// Response to `POST /log_drink`
#[derive(Debug, Serialize, Deserialize)]
pub struct LogDrinkResponse {
    /// Always "logged"
    pub status: String,
    /// The fields exactly as received
    pub drink: NewDrink,
}

impl LogDrinkResponse {
    pub fn logged(drink: NewDrink) -> Self {
        Self {
            status: "logged".to_string(),
            drink,
        }
    }
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub store: String,
    /// Rows in the drink log, absent when the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drinks_logged: Option<u64>,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Query parameters for `GET /api/drinks/export`
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Only "csv" is supported
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}
