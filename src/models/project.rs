//! Modelo de Project
//!
//! Seguimiento de un wrap en curso. El progreso no se guarda: se deriva del
//! estado con el vocabulario de `status`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Project - mapea a la tabla projects
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_info: String,
    pub wrap_type: String,
    pub cover_image: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    pub notes: String,
    pub images: Vec<String>,
    pub quote_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
