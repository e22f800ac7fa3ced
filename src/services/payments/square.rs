//! Cliente de Square
//!
//! Payment links (Checkout API) y verificación de la cabecera
//! `x-square-hmacsha256-signature`. El número de pedido viaja en la nota
//! del pago: "Order XS-… | …".

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use uuid::Uuid;

use super::{CheckoutSession, CheckoutSessionRequest, PaymentError, PaymentProvider};
use crate::config::SquareConfig;
use crate::models::PaymentConfirmation;

type HmacSha256 = Hmac<Sha256>;

const SQUARE_VERSION: &str = "2024-01-18";

pub const PAYMENT_COMPLETED: &str = "payment.completed";

lazy_static! {
    static ref ORDER_IN_NOTE: Regex = Regex::new(r"(?i)Order\s+(XS-[A-Z0-9]+)").unwrap();
}

pub struct SquareClient {
    http: reqwest::Client,
    config: SquareConfig,
    /// Location id, consultada una sola vez por cliente
    location_id: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    id: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkResponse {
    payment_link: Option<PaymentLink>,
    #[serde(default)]
    errors: Vec<SquareApiError>,
}

#[derive(Debug, Deserialize)]
struct PaymentLink {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SquareApiError {
    detail: Option<String>,
    code: Option<String>,
}

impl SquareClient {
    pub fn new(http: reqwest::Client, config: SquareConfig) -> Self {
        Self {
            http,
            config,
            location_id: OnceCell::new(),
        }
    }

    async fn location_id(&self) -> Result<&str, PaymentError> {
        self.location_id
            .get_or_try_init(|| self.fetch_location_id())
            .await
            .map(String::as_str)
    }

    async fn fetch_location_id(&self) -> Result<String, PaymentError> {
        debug!("📍 Consultando location de Square");

        let response = self
            .http
            .get(format!("{}/v2/locations", self.config.base_url()))
            .bearer_auth(&self.config.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Api(format!("listing locations failed: HTTP {}", response.status())));
        }

        let body: LocationsResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        let location = body
            .locations
            .iter()
            .find(|l| l.status.as_deref() == Some("ACTIVE"))
            .or_else(|| body.locations.first())
            .ok_or_else(|| PaymentError::Api("no Square location found".to_string()))?;

        info!("📍 Square location: {}", location.id);
        Ok(location.id.clone())
    }

    fn payment_note(request: &CheckoutSessionRequest) -> String {
        let mut note = format!("Order {}", request.order_number);
        for part in [&request.wrap_type, &request.vehicle_info, &request.customer_name] {
            if !part.is_empty() {
                note.push_str(" | ");
                note.push_str(part);
            }
        }
        note
    }
}

#[async_trait]
impl PaymentProvider for SquareClient {
    fn name(&self) -> &'static str {
        "square"
    }

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, PaymentError> {
        if self.config.access_token.is_empty() {
            return Err(PaymentError::NotConfigured("SQUARE_ACCESS_TOKEN"));
        }

        let amount = request.deposit_cents()?;
        let location_id = self.location_id().await?;
        debug!("💳 Creando payment link de Square para {}", request.order_number);

        let mut body = json!({
            "idempotency_key": Uuid::new_v4().to_string(),
            "quick_pay": {
                "name": request.line_item_name(),
                "price_money": { "amount": amount, "currency": "USD" },
                "location_id": location_id,
            },
            "payment_note": Self::payment_note(request),
            "checkout_options": {
                "redirect_url": format!("{}/checkout/success?order={}", request.site_url, request.order_number),
            },
        });
        if let Some(email) = request.customer_email.as_ref().filter(|e| !e.is_empty()) {
            body["pre_populated_data"] = json!({ "buyer_email": email });
        }

        let response = self
            .http
            .post(format!("{}/v2/online-checkout/payment-links", self.config.base_url()))
            .bearer_auth(&self.config.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let parsed: PaymentLinkResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        if !status.is_success() || !parsed.errors.is_empty() {
            let detail = parsed
                .errors
                .iter()
                .map(|e| e.detail.clone().or_else(|| e.code.clone()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PaymentError::Api(format!("HTTP {}: {}", status, detail)));
        }

        let link = parsed
            .payment_link
            .ok_or_else(|| PaymentError::Parse("response without payment_link".to_string()))?;

        info!("✅ Payment link {} creado para {}", link.id, request.order_number);
        Ok(CheckoutSession { id: link.id, url: link.url })
    }
}

/// base64(HMAC-SHA256(clave, notification_url + body)) == cabecera
pub fn verify_signature(signature_key: &str, notification_url: &str, body: &str, signature_header: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature_header.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(signature_key.as_bytes()) else {
        return false;
    };
    mac.update(notification_url.as_bytes());
    mac.update(body.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Número de pedido codificado en la nota del pago
pub fn order_number_from_note(note: &str) -> Option<String> {
    ORDER_IN_NOTE
        .captures(note)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// Evento de webhook de Square
#[derive(Debug, Deserialize)]
pub struct SquareEvent {
    pub event_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Option<serde_json::Value>,
}

/// Extraer la confirmación de un `payment.completed`. Acepta las claves en
/// snake_case y camelCase.
pub fn confirmation_from_event(event: &SquareEvent) -> Option<PaymentConfirmation> {
    if event.event_type != PAYMENT_COMPLETED {
        return None;
    }

    let payment = event.data.as_ref()?.pointer("/object/payment")?;
    let text = |snake: &str, camel: &str| {
        payment
            .get(snake)
            .or_else(|| payment.get(camel))
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let order_number = order_number_from_note(payment.get("note").and_then(|v| v.as_str()).unwrap_or(""))?;

    let cents = payment
        .pointer("/amountMoney/amount")
        .or_else(|| payment.pointer("/amount_money/amount"))
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    let payment_id = text("id", "id").unwrap_or_default();

    Some(PaymentConfirmation {
        provider: "square",
        // Sin event_id se usa el id del pago: un pago solo se completa una vez
        event_id: event.event_id.clone().unwrap_or_else(|| payment_id.clone()),
        event_type: event.event_type.clone(),
        order_number,
        amount_paid: Decimal::new(cents, 2),
        payment_reference: payment_id,
        customer_email: text("buyer_email_address", "buyerEmailAddress"),
        customer_name: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payment: serde_json::Value) -> SquareEvent {
        serde_json::from_value(json!({
            "event_id": "evt-sq-1",
            "type": "payment.completed",
            "data": { "type": "payment", "id": "p1", "object": { "payment": payment } }
        }))
        .expect("event")
    }

    #[test]
    fn test_order_number_from_note() {
        assert_eq!(order_number_from_note("Order XS-LOYW3V28 | Full Wrap").as_deref(), Some("XS-LOYW3V28"));
        assert_eq!(order_number_from_note("order   xs-abc123").as_deref(), Some("XS-ABC123"));
        assert_eq!(order_number_from_note("Deposit for XS-ABC"), None);
        assert_eq!(order_number_from_note(""), None);
    }

    #[test]
    fn test_confirmation_with_camel_case_fields() {
        let confirmation = confirmation_from_event(&event(json!({
            "id": "pay_1",
            "note": "Order XS-K2J9 | Half Wrap",
            "amountMoney": { "amount": 103700, "currency": "USD" },
            "buyerEmailAddress": "rin@example.com"
        })))
        .expect("confirmation");

        assert_eq!(confirmation.order_number, "XS-K2J9");
        assert_eq!(confirmation.amount_paid, Decimal::from(1037));
        assert_eq!(confirmation.payment_reference, "pay_1");
        assert_eq!(confirmation.event_id, "evt-sq-1");
        assert_eq!(confirmation.customer_email.as_deref(), Some("rin@example.com"));
    }

    #[test]
    fn test_confirmation_with_snake_case_fields() {
        let confirmation = confirmation_from_event(&event(json!({
            "id": "pay_2",
            "note": "Order XS-K2JA",
            "amount_money": { "amount": 12550 },
            "buyer_email_address": "kai@example.com"
        })))
        .expect("confirmation");

        assert_eq!(confirmation.amount_paid, Decimal::new(12550, 2));
        assert_eq!(confirmation.customer_email.as_deref(), Some("kai@example.com"));
    }

    #[test]
    fn test_payment_without_order_in_note_is_ignored() {
        assert!(confirmation_from_event(&event(json!({ "id": "pay_3", "note": "tip" }))).is_none());
    }

    #[test]
    fn test_signature_verification() {
        let key = "sq-signature-key";
        let url = "https://shop.example/api/webhooks/square";
        let body = r#"{"type":"payment.completed"}"#;

        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("hmac key");
        mac.update(format!("{}{}", url, body).as_bytes());
        let header = STANDARD.encode(mac.finalize().into_bytes());

        assert!(verify_signature(key, url, body, &header));
        assert!(!verify_signature(key, "https://other.example/hook", body, &header));
        assert!(!verify_signature(key, url, body, "not base64!"));
        assert!(!verify_signature(key, url, body, ""));
    }

    #[test]
    fn test_payment_note_format() {
        let request = CheckoutSessionRequest {
            order_number: "XS-1".to_string(),
            product_name: String::new(),
            product_slug: String::new(),
            wrap_type: "Hood Only".to_string(),
            design_tier: String::new(),
            vehicle_info: String::new(),
            customer_name: "Rin".to_string(),
            customer_email: None,
            total_price: Decimal::from(504),
            deposit_amount: Decimal::from(126),
            site_url: String::new(),
        };
        let note = SquareClient::payment_note(&request);
        assert_eq!(note, "Order XS-1 | Hood Only | Rin");
        assert_eq!(order_number_from_note(&note).as_deref(), Some("XS-1"));
    }
}
