use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::{CacheOperations, RedisClient};
use crate::dto::vehicle_dto::{VehicleListResponse, VehicleStatsResponse, VehicleUploadResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::vehicle_import_service::{parse_vehicle_rows, read_first_sheet};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
    cache: Option<RedisClient>,
}

impl VehicleController {
    pub fn new(pool: PgPool, cache: Option<RedisClient>) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            cache,
        }
    }

    pub async fn list(&self, make: Option<&str>) -> AppResult<VehicleListResponse> {
        let make = make.map(str::trim).filter(|m| !m.is_empty());

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get::<VehicleListResponse>(&cache.vehicles_key(make)).await {
                return Ok(cached);
            }
        }

        let vehicles = self.repository.list(make).await?;
        let response = VehicleListResponse {
            count: vehicles.len(),
            vehicles,
        };

        if let Some(cache) = &self.cache {
            let ttl = cache.config().vehicle_ttl;
            if let Err(e) = cache.set(&cache.vehicles_key(make), &response, ttl).await {
                warn!("⚠️ No se pudo cachear el listado de vehículos: {}", e);
            }
        }

        Ok(response)
    }

    pub async fn stats(&self) -> AppResult<VehicleStatsResponse> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get::<VehicleStatsResponse>(&cache.vehicle_stats_key()).await {
                return Ok(cached);
            }
        }

        let stats = self.repository.stats().await?;

        if let Some(cache) = &self.cache {
            let ttl = cache.config().default_ttl;
            if let Err(e) = cache.set(&cache.vehicle_stats_key(), &stats, ttl).await {
                warn!("⚠️ No se pudo cachear las estadísticas de vehículos: {}", e);
            }
        }

        Ok(stats)
    }

    /// Reemplaza la tabla completa con el contenido de la hoja
    pub async fn upload(&self, bytes: Vec<u8>) -> AppResult<VehicleUploadResponse> {
        let rows = read_first_sheet(bytes)?;
        let outcome = parse_vehicle_rows(&rows);

        if outcome.vehicles.is_empty() {
            return Err(AppError::BadRequestWithDetails {
                message: "No valid vehicles found in file".to_string(),
                details: json!({ "errors": outcome.warnings }),
            });
        }

        let inserted = self.repository.replace_all(&outcome.vehicles).await?;
        self.invalidate_cache().await;

        let skipped = outcome.warnings.len();
        info!("🚗 {} vehículos importados ({} filas omitidas)", inserted, skipped);

        Ok(VehicleUploadResponse {
            success: true,
            inserted,
            message: format!("Successfully uploaded {} vehicles ({} rows skipped)", inserted, skipped),
            errors: (!outcome.warnings.is_empty()).then_some(outcome.warnings),
        })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        self.invalidate_cache().await;
        Ok(())
    }

    async fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete_prefix(&cache.vehicles_prefix()).await {
                warn!("⚠️ No se pudo invalidar el cache de vehículos: {}", e);
            }
        }
    }
}
