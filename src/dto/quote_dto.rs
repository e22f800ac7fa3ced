use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Quote, StatusView};

/// Formulario público de presupuesto
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub vehicle_info: Option<String>,
    pub wrap_type: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
    #[serde(default)]
    pub reference_images: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteResponse {
    pub success: bool,
    pub quote_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct QuoteListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteNotesRequest {
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub quoted_price: Option<Decimal>,
}

/// Presupuesto con su estado listo para pintar y los pasos vecinos del flujo
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub status_view: StatusView,
    pub next_status: Option<&'static str>,
    pub previous_status: Option<&'static str>,
}
