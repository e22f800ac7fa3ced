use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRevisionRequest {
    pub project_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub reference_images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateRevisionResponse {
    pub id: Uuid,
    pub revision_number: i32,
}

#[derive(Debug, Deserialize)]
pub struct RespondRevisionRequest {
    pub admin_response: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}
