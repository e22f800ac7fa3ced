use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Project, StatusColor};

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle_info: Option<String>,
    pub wrap_type: Option<String>,
    pub cover_image: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub quote_id: Option<Uuid>,
}

/// Proyecto con progreso y color derivados del estado
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub progress: u8,
    pub color: StatusColor,
}
