use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::CacheConfig;

/// Operaciones básicas de cache. Un fallo de lectura se trata como MISS.
#[async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    async fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("{}:{}:{}", self.config.key_prefix, prefix, identifier)
    }

    /// Clave del listado de vehículos (todos o de una marca)
    pub fn vehicles_key(&self, make: Option<&str>) -> String {
        self.make_key("vehicles", make.unwrap_or("__all__"))
    }

    pub fn vehicle_stats_key(&self) -> String {
        self.make_key("vehicles", "__stats__")
    }

    /// Prefijo que agrupa todas las claves de vehículos
    pub fn vehicles_prefix(&self) -> String {
        self.make_key("vehicles", "")
    }
}

#[async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => match serde_json::from_str(&value) {
                Ok(parsed) => {
                    debug!("📥 Cache HIT para clave: {}", key);
                    Some(parsed)
                }
                Err(e) => {
                    warn!("⚠️ Valor corrupto en cache para clave {}: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                None
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                None
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let serialized = serde_json::to_string(value)?;

        let result: RedisResult<()> = conn.set_ex(key, serialized, ttl).await;
        result?;
        debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let mut conn = self.manager.clone();

        let keys: Vec<String> = {
            let mut iter = conn.scan_match::<_, String>(format!("{}*", prefix)).await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.manager.clone();
        let deleted: i64 = conn.del(&keys).await?;
        debug!("🗑️ Cache DELETE prefijo {} (eliminados: {})", prefix, deleted);
        Ok(deleted as usize)
    }
}
