use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Order, Revision};

use super::project_dto::ProjectResponse;

#[derive(Debug, Deserialize)]
pub struct PortalDataQuery {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ProjectOption {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct OrderOption {
    pub id: Uuid,
    pub order_number: String,
}

/// Opciones para los desplegables del formulario de revisión
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PortalOptions {
    Projects(Vec<ProjectOption>),
    Orders(Vec<OrderOption>),
    Empty(Vec<()>),
}

#[derive(Debug, Serialize)]
pub struct PortalCounts {
    pub orders: usize,
    pub active_projects: usize,
    pub pending_revisions: usize,
}

#[derive(Debug, Serialize)]
pub struct PortalDashboardResponse {
    pub email: String,
    pub orders: Vec<Order>,
    pub projects: Vec<ProjectResponse>,
    pub revisions: Vec<Revision>,
    pub counts: PortalCounts,
}
