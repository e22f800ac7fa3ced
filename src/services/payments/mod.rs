//! Proveedores de pago
//!
//! Cada despliegue usa un único proveedor (Stripe o Square) para cobrar el
//! depósito del 25 %. Ambos exponen una página de pago alojada y confirman el
//! cobro por webhook.

pub mod square;
pub mod stripe;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::{EnvironmentConfig, PaymentProviderKind};
use crate::pricing::calculator::round_half_up;
use crate::utils::errors::AppError;

pub use square::SquareClient;
pub use stripe::StripeClient;

/// Prefijo de los números de pedido
pub const ORDER_NUMBER_PREFIX: &str = "XS-";

/// Errores de los proveedores de pago
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("provider API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("invalid webhook: {0}")]
    InvalidWebhook(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<PaymentError> for AppError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::InvalidWebhook(msg) => AppError::InvalidSignature(msg),
            PaymentError::NotConfigured(what) => AppError::Internal(format!("{} is not configured", what)),
            PaymentError::Network(msg) => AppError::ExternalApi(msg),
            PaymentError::InvalidAmount(msg) => AppError::BadRequest(msg),
            other => AppError::PaymentProvider(other.to_string()),
        }
    }
}

/// Datos para crear la página de pago del depósito
#[derive(Debug, Clone)]
pub struct CheckoutSessionRequest {
    pub order_number: String,
    pub product_name: String,
    pub product_slug: String,
    pub wrap_type: String,
    pub design_tier: String,
    pub vehicle_info: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    /// URL pública del sitio, sin barra final
    pub site_url: String,
}

impl CheckoutSessionRequest {
    /// Depósito en céntimos, redondeado half-up
    pub fn deposit_cents(&self) -> Result<i64, PaymentError> {
        self.deposit_amount
            .checked_mul(Decimal::from(100))
            .map(round_half_up)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(|| PaymentError::InvalidAmount(format!("deposit {} out of range", self.deposit_amount)))
    }

    pub fn line_item_name(&self) -> String {
        let product = if self.product_name.is_empty() { "Custom Wrap" } else { &self.product_name };
        format!("{} - 25% Deposit", product)
    }

    pub fn line_item_description(&self) -> String {
        let wrap = if self.wrap_type.is_empty() { "wrap" } else { &self.wrap_type };
        format!("Deposit for {} (Total: ${})", wrap, self.total_price.normalize())
    }

    pub fn cancel_url(&self) -> String {
        if self.product_slug.is_empty() {
            format!("{}/collections", self.site_url)
        } else {
            format!("{}/collections/{}", self.site_url, self.product_slug)
        }
    }
}

/// Página de pago creada por el proveedor
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Proveedor de pagos con página de checkout alojada
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// "stripe" | "square"
    fn name(&self) -> &'static str;

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, PaymentError>;
}

/// Instanciar el proveedor configurado en PAYMENT_PROVIDER
pub fn create_provider(config: &EnvironmentConfig, http: reqwest::Client) -> Arc<dyn PaymentProvider> {
    match config.payment_provider {
        PaymentProviderKind::Stripe => Arc::new(StripeClient::new(http, config.stripe.secret_key.clone())),
        PaymentProviderKind::Square => Arc::new(SquareClient::new(http, config.square.clone())),
    }
}

/// Número de pedido: `XS-` + milisegundos Unix en base 36, en mayúsculas
pub fn generate_order_number() -> String {
    order_number_from_millis(chrono::Utc::now().timestamp_millis())
}

pub fn order_number_from_millis(millis: i64) -> String {
    format!("{}{}", ORDER_NUMBER_PREFIX, to_base36(millis.unsigned_abs()))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
