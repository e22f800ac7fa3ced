use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleStatsResponse;
use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

/// Filas por INSERT en la sustitución completa de la tabla
pub const INSERT_BATCH_SIZE: usize = 500;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado ordenado por marca, modelo y año descendente
    pub async fn list(&self, make: Option<&str>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::TEXT IS NULL OR make = $1)
            ORDER BY make ASC, model ASC, year DESC
            "#,
        )
        .bind(make)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    pub async fn stats(&self) -> Result<VehicleStatsResponse, AppError> {
        let (total_vehicles, total_makes): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT make) FROM vehicles")
                .fetch_one(&self.pool)
                .await?;

        Ok(VehicleStatsResponse {
            total_vehicles,
            total_makes,
        })
    }

    /// Sustituir la tabla completa: borrar todo e insertar por lotes, en una
    /// transacción. Si un lote falla no se pierde la tabla anterior.
    pub async fn replace_all(&self, vehicles: &[NewVehicle]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM vehicles").execute(&mut *tx).await?;

        let mut inserted = 0;
        for batch in vehicles.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO vehicles (make, model, year, trim, sqft_25, sqft_50, sqft_75, total_sqft) ",
            );
            builder.push_values(batch, |mut row, vehicle| {
                row.push_bind(&vehicle.make)
                    .push_bind(&vehicle.model)
                    .push_bind(vehicle.year)
                    .push_bind(&vehicle.trim)
                    .push_bind(vehicle.sqft_25)
                    .push_bind(vehicle.sqft_50)
                    .push_bind(vehicle.sqft_75)
                    .push_bind(vehicle.total_sqft);
            });
            let result = builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
