//! Modelo de Revision
//!
//! Peticiones de cambio de diseño enviadas por el cliente desde el portal.
//! `revision_number` es correlativo por email de cliente.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Revision - mapea a la tabla revisions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Revision {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub customer_email: String,
    pub revision_number: i32,
    pub description: String,
    pub reference_images: Vec<String>,
    pub status: String,
    pub admin_response: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
