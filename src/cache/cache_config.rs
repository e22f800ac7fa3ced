//! Configuración de cache
//!
//! Este módulo contiene la configuración para el cache Redis opcional.

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
    /// TTL de los listados de vehículos; se invalidan al subir o borrar
    pub vehicle_ttl: u64,
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            default_ttl: 3600, // 1 hora
            vehicle_ttl: 6 * 3600,
            key_prefix: "itasha_wraps".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn from_url(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            ..Self::default()
        }
    }
}
