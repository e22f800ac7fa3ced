//! Modelo de Quote
//!
//! Solicitudes de presupuesto enviadas desde el formulario de contacto.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Quote - mapea a la tabla quotes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_info: String,
    pub wrap_type: String,
    pub message: String,
    pub reference_images: Vec<String>,
    pub status: String,
    pub admin_notes: String,
    pub quoted_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
