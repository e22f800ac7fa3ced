use serde::{Deserialize, Serialize};

use crate::models::Vehicle;

#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub make: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<Vehicle>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatsResponse {
    pub total_vehicles: i64,
    pub total_makes: i64,
}

#[derive(Debug, Serialize)]
pub struct VehicleUploadResponse {
    pub success: bool,
    pub inserted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub message: String,
}
