//! Cliente de Stripe
//!
//! Checkout Sessions por la API REST (form-encoded, basic auth) y
//! verificación de la cabecera `stripe-signature` de los webhooks.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use std::str::FromStr;
use tracing::{debug, info};

use super::{CheckoutSession, CheckoutSessionRequest, PaymentError, PaymentProvider};
use crate::models::PaymentConfirmation;

type HmacSha256 = Hmac<Sha256>;

/// Tolerancia del timestamp firmado, en segundos
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    error: StripeApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeApiErrorDetail {
    message: String,
}

/// Evento de webhook (solo los campos que se usan)
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeClient {
    pub fn new(http: reqwest::Client, secret_key: String) -> Self {
        Self {
            http,
            secret_key,
            base_url: "https://api.stripe.com/v1".to_string(),
        }
    }

    fn checkout_form(request: &CheckoutSessionRequest) -> Result<Vec<(String, String)>, PaymentError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][price_data][currency]".to_string(), "usd".to_string()),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.deposit_cents()?.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.line_item_name(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                request.line_item_description(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            (
                "success_url".to_string(),
                format!("{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}", request.site_url),
            ),
            ("cancel_url".to_string(), request.cancel_url()),
        ];

        if let Some(email) = request.customer_email.as_ref().filter(|e| !e.is_empty()) {
            form.push(("customer_email".to_string(), email.clone()));
        }

        let metadata = [
            ("order_number", request.order_number.clone()),
            ("product_slug", request.product_slug.clone()),
            ("wrap_type", request.wrap_type.clone()),
            ("total_price", request.total_price.normalize().to_string()),
            ("deposit_amount", request.deposit_amount.normalize().to_string()),
            ("customer_name", request.customer_name.clone()),
            ("vehicle_info", request.vehicle_info.clone()),
            ("design_tier", request.design_tier.clone()),
        ];
        for (key, value) in metadata {
            form.push((format!("metadata[{}]", key), value));
        }

        Ok(form)
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, PaymentError> {
        if self.secret_key.is_empty() {
            return Err(PaymentError::NotConfigured("STRIPE_SECRET_KEY"));
        }

        debug!("💳 Creando Checkout Session de Stripe para {}", request.order_number);
        let form = Self::checkout_form(request)?;

        let response = self
            .http
            .post(format!("{}/checkout/sessions", self.base_url))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<StripeApiError>(&body) {
                return Err(PaymentError::Api(error.error.message));
            }
            return Err(PaymentError::Api(format!("HTTP {}: {}", status, body)));
        }

        let session: StripeCheckoutSession =
            serde_json::from_str(&body).map_err(|e| PaymentError::Parse(e.to_string()))?;
        let url = session
            .url
            .ok_or_else(|| PaymentError::Parse("checkout session without url".to_string()))?;

        info!("✅ Checkout Session {} creada para {}", session.id, request.order_number);
        Ok(CheckoutSession { id: session.id, url })
    }
}

/// Verificar la cabecera `t=…,v1=…` y devolver el evento ya parseado
pub fn verify_webhook_signature(
    payload: &str,
    signature_header: &str,
    secret: &str,
    now: i64,
) -> Result<StripeEvent, PaymentError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| PaymentError::InvalidWebhook("Missing timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(PaymentError::InvalidWebhook("Missing signature".to_string()));
    }

    let signed_payload = format!("{}.{}", timestamp, payload);
    let matches = signatures.iter().any(|candidate| {
        let Ok(expected) = hex::decode(candidate) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(signed_payload.as_bytes());
        mac.verify_slice(&expected).is_ok()
    });

    if !matches {
        return Err(PaymentError::InvalidWebhook("Signature mismatch".to_string()));
    }

    let timestamp: i64 = timestamp
        .parse()
        .map_err(|_| PaymentError::InvalidWebhook("Invalid timestamp".to_string()))?;
    if (now - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(PaymentError::InvalidWebhook("Timestamp outside the tolerance zone".to_string()));
    }

    serde_json::from_str(payload).map_err(|e| PaymentError::Parse(e.to_string()))
}

/// Extraer la confirmación de un `checkout.session.completed`.
/// Sin `order_number` en metadata no hay nada que aplicar.
pub fn confirmation_from_event(event: &StripeEvent) -> Option<PaymentConfirmation> {
    if event.event_type != CHECKOUT_COMPLETED {
        return None;
    }

    let session = &event.data.object;
    let metadata = session.get("metadata");
    let meta = |key: &str| {
        metadata
            .and_then(|m| m.get(key))
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let order_number = meta("order_number")?;
    let amount_paid = meta("deposit_amount")
        .and_then(|v| Decimal::from_str(v.trim()).ok())
        .unwrap_or(Decimal::ZERO);
    let text = |key: &str| session.get(key).and_then(|v| v.as_str()).map(str::to_string);

    Some(PaymentConfirmation {
        provider: "stripe",
        event_id: event.id.clone(),
        event_type: event.event_type.clone(),
        order_number,
        amount_paid,
        payment_reference: text("payment_intent").unwrap_or_default(),
        customer_email: text("customer_email")
            .or_else(|| session.pointer("/customer_details/email").and_then(|v| v.as_str()).map(str::to_string))
            .filter(|e| !e.is_empty()),
        customer_name: meta("customer_name"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    fn sign(payload: &str, timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).expect("hmac key");
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
    }

    fn completed_payload() -> String {
        serde_json::json!({
            "id": "evt_123",
            "type": "checkout.session.completed",
            "data": { "object": {
                "id": "cs_test_1",
                "payment_intent": "pi_42",
                "customer_email": "rin@example.com",
                "metadata": {
                    "order_number": "XS-LOYW3V28",
                    "deposit_amount": "1037",
                    "customer_name": "Rin"
                }
            }}
        })
        .to_string()
    }

    #[test]
    fn test_valid_signature() {
        let payload = completed_payload();
        let header = sign(&payload, 1_700_000_000);
        let event = verify_webhook_signature(&payload, &header, SECRET, 1_700_000_100).expect("valid");
        assert_eq!(event.id, "evt_123");
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let payload = completed_payload();
        let header = sign(&payload, 1_700_000_000);
        let tampered = payload.replace("1037", "1");
        assert!(matches!(
            verify_webhook_signature(&tampered, &header, SECRET, 1_700_000_000),
            Err(PaymentError::InvalidWebhook(_))
        ));
    }

    #[test]
    fn test_stale_timestamp_is_rejected() {
        let payload = completed_payload();
        let header = sign(&payload, 1_700_000_000);
        let result = verify_webhook_signature(&payload, &header, SECRET, 1_700_000_000 + SIGNATURE_TOLERANCE_SECS + 1);
        assert!(matches!(result, Err(PaymentError::InvalidWebhook(_))));
    }

    #[test]
    fn test_malformed_header() {
        let payload = completed_payload();
        assert!(verify_webhook_signature(&payload, "v1=abc", SECRET, 0).is_err());
        assert!(verify_webhook_signature(&payload, "t=1", SECRET, 1).is_err());
        assert!(verify_webhook_signature(&payload, "", SECRET, 0).is_err());
    }

    #[test]
    fn test_confirmation_from_completed_session() {
        let payload = completed_payload();
        let event: StripeEvent = serde_json::from_str(&payload).expect("event");
        let confirmation = confirmation_from_event(&event).expect("confirmation");

        assert_eq!(confirmation.order_number, "XS-LOYW3V28");
        assert_eq!(confirmation.amount_paid, Decimal::from(1037));
        assert_eq!(confirmation.payment_reference, "pi_42");
        assert_eq!(confirmation.customer_email.as_deref(), Some("rin@example.com"));
        assert_eq!(confirmation.customer_name.as_deref(), Some("Rin"));
    }

    #[test]
    fn test_other_events_yield_nothing() {
        let event: StripeEvent = serde_json::from_value(serde_json::json!({
            "id": "evt_9",
            "type": "payment_intent.succeeded",
            "data": { "object": { "id": "pi_1" } }
        }))
        .expect("event");
        assert!(confirmation_from_event(&event).is_none());
    }

    #[test]
    fn test_checkout_form_carries_order_number() {
        let request = CheckoutSessionRequest {
            order_number: "XS-ABC".to_string(),
            product_name: "Miku Livery".to_string(),
            product_slug: "miku".to_string(),
            wrap_type: "Full Wrap".to_string(),
            design_tier: "premade".to_string(),
            vehicle_info: String::new(),
            customer_name: String::new(),
            customer_email: Some("a@b.co".to_string()),
            total_price: Decimal::from(2000),
            deposit_amount: Decimal::from(500),
            site_url: "https://shop.example".to_string(),
        };
        let form = StripeClient::checkout_form(&request).expect("form");
        let get = |k: &str| form.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

        assert_eq!(get("metadata[order_number]"), Some("XS-ABC"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("50000"));
        assert_eq!(get("customer_email"), Some("a@b.co"));
        assert_eq!(get("cancel_url"), Some("https://shop.example/collections/miku"));
    }
}
