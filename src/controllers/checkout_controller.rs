use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::dto::checkout_dto::{CheckoutRequest, CheckoutResponse};
use crate::models::NewOrder;
use crate::repositories::order_repository::OrderRepository;
use crate::services::payments::{generate_order_number, CheckoutSessionRequest, PaymentProvider};
use crate::utils::errors::AppError;
use crate::utils::validation::{field_error, validate_max, validate_positive};

/// Importe máximo aceptado en un checkout (USD)
pub const MAX_CHECKOUT_AMOUNT: i64 = 1_000_000;

pub struct CheckoutController {
    orders: OrderRepository,
    payments: Arc<dyn PaymentProvider>,
    site_url: String,
}

fn required_amount(field: &'static str, value: Option<Decimal>) -> Result<Decimal, AppError> {
    let value = value.ok_or_else(|| AppError::BadRequest("Missing required price information".to_string()))?;
    validate_positive(value).map_err(|e| field_error(field, e))?;
    validate_max(value, Decimal::from(MAX_CHECKOUT_AMOUNT)).map_err(|e| field_error(field, e))?;
    Ok(value)
}

impl CheckoutController {
    pub fn new(pool: PgPool, payments: Arc<dyn PaymentProvider>, site_url: &str) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            payments,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Crea la página de pago del depósito y el pedido en estado `pending`
    pub async fn create(&self, request: CheckoutRequest) -> Result<CheckoutResponse, AppError> {
        let total_price = required_amount("total_price", request.total_price)?;
        let deposit_amount = required_amount("deposit_amount", request.deposit_amount)?;

        let order_number = generate_order_number();
        let customer_email = request
            .customer_email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        let session_request = CheckoutSessionRequest {
            order_number: order_number.clone(),
            product_name: request.product_name.unwrap_or_default(),
            product_slug: request.product_slug.unwrap_or_default(),
            wrap_type: request.wrap_type.unwrap_or_default(),
            design_tier: request.design_tier.unwrap_or_default(),
            vehicle_info: request.vehicle_info.unwrap_or_default(),
            customer_name: request.customer_name.unwrap_or_default(),
            customer_email,
            total_price,
            deposit_amount,
            site_url: self.site_url.clone(),
        };

        let session = self.payments.create_checkout(&session_request).await?;

        self.orders
            .create(&NewOrder {
                order_number: order_number.clone(),
                customer_email: session_request.customer_email.clone().unwrap_or_default(),
                customer_name: session_request.customer_name,
                vehicle_info: session_request.vehicle_info,
                wrap_type: session_request.wrap_type,
                design_tier: session_request.design_tier,
                total_price,
                deposit_amount,
                payment_provider: self.payments.name().to_string(),
                checkout_session_id: session.id,
            })
            .await?;

        info!(
            "💳 Checkout {} creado con {} (depósito ${})",
            order_number,
            self.payments.name(),
            deposit_amount.normalize()
        );

        Ok(CheckoutResponse {
            url: session.url,
            order_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_amount() {
        assert_eq!(
            required_amount("total_price", Some(Decimal::from(4149))).unwrap(),
            Decimal::from(4149)
        );
        assert!(matches!(required_amount("total_price", None), Err(AppError::BadRequest(_))));
        assert!(matches!(
            required_amount("deposit_amount", Some(Decimal::ZERO)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            required_amount("deposit_amount", Some(Decimal::MAX)),
            Err(AppError::Validation(_))
        ));
        assert!(required_amount("total_price", Some(Decimal::from(MAX_CHECKOUT_AMOUNT))).is_ok());
    }
}
