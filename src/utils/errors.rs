//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores de la API y su conversión a
//! respuestas HTTP. La lógica de precios y estados nunca produce errores:
//! solo la capa HTTP, la base de datos y los proveedores de pago.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Bad request con detalle estructurado (p.ej. avisos de una importación)
    #[error("Bad request: {message}")]
    BadRequestWithDetails {
        message: String,
        details: serde_json::Value,
    },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Payment provider error: {0}")]
    PaymentProvider(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Validation Error", "The provided data is invalid".to_string(), "VALIDATION_ERROR")
                        .with_details(json!(e)),
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"))
            }

            AppError::Forbidden(msg) => {
                warn!("🚫 Forbidden access: {}", msg);
                (StatusCode::FORBIDDEN, ErrorResponse::new("Forbidden", msg, "FORBIDDEN"))
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found", msg, "NOT_FOUND"))
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new("Conflict", msg, "CONFLICT"))
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"))
            }

            AppError::BadRequestWithDetails { message, details } => {
                warn!("⚠️ Bad request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", message, "BAD_REQUEST").with_details(details),
                )
            }

            AppError::InvalidSignature(msg) => {
                warn!("🔏 Invalid webhook signature: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Invalid Signature", msg, "INVALID_SIGNATURE"))
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal Server Error", "An unexpected error occurred".to_string(), "INTERNAL_ERROR"),
                )
            }

            AppError::RateLimitExceeded => {
                warn!("🐢 Rate limit exceeded");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorResponse::new(
                        "Rate Limit Exceeded",
                        "Too many requests. Please try again later".to_string(),
                        "RATE_LIMIT_EXCEEDED",
                    ),
                )
            }

            AppError::PaymentProvider(msg) => {
                error!("💳 Payment provider error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("Payment Provider Error", msg, "PAYMENT_PROVIDER_ERROR"),
                )
            }

            AppError::ExternalApi(msg) => {
                error!("❌ External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "External API Error",
                        "An error occurred while communicating with external service".to_string(),
                        "EXTERNAL_API_ERROR",
                    )
                    .with_details(json!({ "external_api_error": msg })),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
