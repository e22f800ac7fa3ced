use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Datos del checkout del depósito (25 %)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    pub product_name: Option<String>,
    pub product_slug: Option<String>,
    pub wrap_type: Option<String>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub vehicle_info: Option<String>,
    pub design_tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
    pub order_number: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
