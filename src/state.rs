//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::RedisClient;
use crate::config::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::services::jwt_service::JwtService;
use crate::services::payments::{create_provider, PaymentProvider};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Redis es opcional: sin él los listados se leen siempre de la base
    pub redis: Option<RedisClient>,
    pub payments: Arc<dyn PaymentProvider>,
    pub jwt: JwtService,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: Option<RedisClient>) -> Self {
        let payments = create_provider(&config, Client::new());

        Self {
            pool,
            jwt: JwtService::from_config(&config),
            rate_limit: RateLimitState::from_config(&config),
            redis,
            payments,
            config,
        }
    }
}
