use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::EnvironmentConfig;
use crate::dto::checkout_dto::WebhookAck;
use crate::models::PaymentConfirmation;
use crate::repositories::order_repository::OrderRepository;
use crate::services::payments::{square, stripe, PaymentError};
use crate::utils::errors::AppError;

/// Ruta pública del webhook de Square, usada en la firma si no se configura otra URL
pub const SQUARE_WEBHOOK_PATH: &str = "/api/webhooks/square";

pub struct WebhookController {
    orders: OrderRepository,
    stripe_secret: Option<String>,
    square_signature_key: Option<String>,
    square_notification_url: String,
}

impl WebhookController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        let square_notification_url = config.square.webhook_url.clone().unwrap_or_else(|| {
            format!("{}{}", config.public_site_url.trim_end_matches('/'), SQUARE_WEBHOOK_PATH)
        });

        Self {
            orders: OrderRepository::new(pool),
            stripe_secret: config.stripe.webhook_secret.clone(),
            square_signature_key: config.square.webhook_signature_key.clone(),
            square_notification_url,
        }
    }

    pub async fn stripe(&self, signature: Option<&str>, body: &str) -> Result<WebhookAck, AppError> {
        let signature = signature.ok_or_else(|| AppError::BadRequest("Missing stripe-signature header".to_string()))?;
        let secret = self
            .stripe_secret
            .as_deref()
            .ok_or(PaymentError::NotConfigured("STRIPE_WEBHOOK_SECRET"))?;

        let event = stripe::verify_webhook_signature(body, signature, secret, chrono::Utc::now().timestamp())?;
        debug!("📨 Evento Stripe {} ({})", event.id, event.event_type);

        if let Some(confirmation) = stripe::confirmation_from_event(&event) {
            self.apply(&confirmation).await?;
        }

        Ok(WebhookAck { received: true })
    }

    pub async fn square(&self, signature: Option<&str>, body: &str) -> Result<WebhookAck, AppError> {
        if let Some(key) = self.square_signature_key.as_deref() {
            let valid = signature
                .map(|header| square::verify_signature(key, &self.square_notification_url, body, header))
                .unwrap_or(false);
            if !valid {
                return Err(PaymentError::InvalidWebhook("Invalid Square signature".to_string()).into());
            }
        }

        let event: square::SquareEvent =
            serde_json::from_str(body).map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {}", e)))?;
        debug!("📨 Evento Square {}", event.event_type);

        if let Some(confirmation) = square::confirmation_from_event(&event) {
            self.apply(&confirmation).await?;
        }

        Ok(WebhookAck { received: true })
    }

    async fn apply(&self, confirmation: &PaymentConfirmation) -> Result<(), AppError> {
        let outcome = self.orders.apply_confirmation(confirmation).await?;
        info!(
            "📬 Webhook {} {} para {}: {:?}",
            confirmation.provider, confirmation.event_id, confirmation.order_number, outcome
        );
        Ok(())
    }
}
