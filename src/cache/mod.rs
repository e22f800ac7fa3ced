//! Cache
//!
//! Cache Redis opcional para los listados de vehículos.

pub mod cache_config;
pub mod redis_client;

pub use cache_config::CacheConfig;
pub use redis_client::{CacheOperations, RedisClient};
