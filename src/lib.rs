//! Backend de la tienda de wraps itasha
//!
//! Calculador de precios, checkout del depósito con Stripe o Square,
//! webhooks de pago, importación de vehículos y paneles de cliente y
//! administración.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Tiempo máximo por request (las llamadas a los proveedores incluidas)
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Construir la aplicación completa
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::create_api_router(&state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
