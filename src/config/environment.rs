//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: servidor, identidad,
//! CORS, rate limiting y credenciales de los proveedores de pago.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Errores al leer la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number (got '{value}')")]
    InvalidNumber { name: &'static str, value: String },

    #[error("PAYMENT_PROVIDER must be 'stripe' or 'square' (got '{0}')")]
    InvalidPaymentProvider(String),
}

/// Proveedor de pagos activo en el despliegue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProviderKind {
    Stripe,
    Square,
}

impl FromStr for PaymentProviderKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stripe" => Ok(PaymentProviderKind::Stripe),
            "square" => Ok(PaymentProviderKind::Square),
            other => Err(ConfigError::InvalidPaymentProvider(other.to_string())),
        }
    }
}

/// Credenciales de Stripe
#[derive(Debug, Clone, Default)]
pub struct StripeConfig {
    pub secret_key: String,
    pub webhook_secret: Option<String>,
}

/// Credenciales de Square
#[derive(Debug, Clone, Default)]
pub struct SquareConfig {
    pub access_token: String,
    /// "production" o "sandbox"
    pub environment: String,
    pub webhook_signature_key: Option<String>,
    /// URL exacta registrada en Square; forma parte del payload firmado
    pub webhook_url: Option<String>,
}

impl SquareConfig {
    pub fn base_url(&self) -> &'static str {
        if self.environment == "production" {
            "https://connect.squareup.com"
        } else {
            "https://connect.squareupsandbox.com"
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Secreto con el que el proveedor de identidad firma sus tokens
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
    /// Emails con acceso al panel. Vacío => cualquier usuario autenticado
    pub admin_emails: Vec<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub public_site_url: String,
    pub payment_provider: PaymentProviderKind,
    pub stripe: StripeConfig,
    pub square: SquareConfig,
    pub redis_url: Option<String>,
    /// Tamaño máximo del .xlsx de vehículos, en bytes
    pub max_upload_bytes: usize,
}

/// Límite por defecto de la subida de vehículos (25 MiB)
pub const DEFAULT_MAX_UPLOAD_MB: usize = 25;

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: String::new(),
            jwt_audience: None,
            admin_emails: Vec::new(),
            cors_origins: Vec::new(),
            rate_limit_requests: 30,
            rate_limit_window: 60,
            public_site_url: "http://localhost:3000".to_string(),
            payment_provider: PaymentProviderKind::Stripe,
            stripe: StripeConfig::default(),
            square: SquareConfig {
                environment: "sandbox".to_string(),
                ..SquareConfig::default()
            },
            redis_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn number<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

fn list(name: &str) -> Vec<String> {
    optional(name)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let payment_provider = match optional("PAYMENT_PROVIDER") {
            Some(value) => value.parse()?,
            None => defaults.payment_provider,
        };

        let stripe = StripeConfig {
            secret_key: optional("STRIPE_SECRET_KEY").unwrap_or_default(),
            webhook_secret: optional("STRIPE_WEBHOOK_SECRET"),
        };
        let square = SquareConfig {
            access_token: optional("SQUARE_ACCESS_TOKEN").unwrap_or_default(),
            environment: optional("SQUARE_ENVIRONMENT").unwrap_or(defaults.square.environment),
            webhook_signature_key: optional("SQUARE_WEBHOOK_SIGNATURE_KEY"),
            webhook_url: optional("SQUARE_WEBHOOK_URL"),
        };

        // Solo las credenciales del proveedor activo son obligatorias
        match payment_provider {
            PaymentProviderKind::Stripe if stripe.secret_key.is_empty() => {
                return Err(ConfigError::Missing("STRIPE_SECRET_KEY"))
            }
            PaymentProviderKind::Square if square.access_token.is_empty() => {
                return Err(ConfigError::Missing("SQUARE_ACCESS_TOKEN"))
            }
            _ => {}
        }

        Ok(Self {
            environment: optional("ENVIRONMENT").unwrap_or(defaults.environment),
            port: number("PORT", defaults.port)?,
            host: optional("HOST").unwrap_or(defaults.host),
            jwt_secret: required("JWT_SECRET")?,
            jwt_audience: optional("JWT_AUDIENCE"),
            admin_emails: list("ADMIN_EMAILS")
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            cors_origins: list("CORS_ORIGINS"),
            rate_limit_requests: number("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: number("RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            public_site_url: optional("PUBLIC_SITE_URL")
                .unwrap_or(defaults.public_site_url)
                .trim_end_matches('/')
                .to_string(),
            payment_provider,
            stripe,
            square,
            redis_url: optional("REDIS_URL"),
            max_upload_bytes: number("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)? * 1024 * 1024,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ¿Tiene este email acceso al panel de administración?
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.is_empty() || self.admin_emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}
