//! Modelo de Order
//!
//! Pedido creado en el checkout. Nace con payment_status y status `pending`
//! y pasa a `deposit_paid` / `confirmed` cuando el webhook del proveedor
//! confirma el depósito.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Order - mapea a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,
    pub customer_email: String,
    pub customer_name: String,
    pub vehicle_info: String,
    pub wrap_type: String,
    pub design_tier: String,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub amount_paid: Decimal,
    /// stripe | square
    pub payment_provider: String,
    /// Checkout Session (Stripe) o payment link (Square)
    pub checkout_session_id: String,
    /// payment_intent (Stripe) o payment id (Square), rellenado por el webhook
    pub payment_reference: String,
    pub payment_status: String,
    pub status: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos de un pedido nuevo, ya con la sesión de pago creada
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_email: String,
    pub customer_name: String,
    pub vehicle_info: String,
    pub wrap_type: String,
    pub design_tier: String,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub payment_provider: String,
    pub checkout_session_id: String,
}

/// Confirmación de pago normalizada, independiente del proveedor
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub provider: &'static str,
    pub event_id: String,
    pub event_type: String,
    pub order_number: String,
    pub amount_paid: Decimal,
    pub payment_reference: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
}
