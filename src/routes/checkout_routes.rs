use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};

use crate::controllers::checkout_controller::CheckoutController;
use crate::controllers::webhook_controller::WebhookController;
use crate::dto::checkout_dto::{CheckoutRequest, CheckoutResponse, WebhookAck};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkout_router() -> Router<AppState> {
    Router::new().route("/", post(create_checkout))
}

/// Webhooks de los proveedores: el cuerpo se lee crudo para verificar la firma
pub fn create_webhook_router() -> Router<AppState> {
    Router::new()
        .route("/stripe", post(stripe_webhook))
        .route("/square", post(square_webhook))
}

async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let controller = CheckoutController::new(state.pool.clone(), state.payments.clone(), &state.config.public_site_url);
    Ok(Json(controller.create(request).await?))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn body_text(body: &Bytes) -> Result<&str, AppError> {
    std::str::from_utf8(body).map_err(|_| AppError::BadRequest("Webhook body is not UTF-8".to_string()))
}

async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let controller = WebhookController::new(state.pool.clone(), &state.config);
    let ack = controller
        .stripe(header(&headers, "stripe-signature"), body_text(&body)?)
        .await?;
    Ok(Json(ack))
}

async fn square_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let controller = WebhookController::new(state.pool.clone(), &state.config);
    let ack = controller
        .square(header(&headers, "x-square-hmacsha256-signature"), body_text(&body)?)
        .await?;
    Ok(Json(ack))
}
