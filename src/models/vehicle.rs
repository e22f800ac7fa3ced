//! Modelo de Vehicle
//!
//! Fila de la tabla vehicles, cargada desde la hoja de cálculo del
//! administrador. Es independiente de la tabla estática del calculador.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub sqft_25: Option<Decimal>,
    pub sqft_50: Option<Decimal>,
    pub sqft_75: Option<Decimal>,
    pub total_sqft: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Fila válida leída del spreadsheet, pendiente de insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub sqft_25: Option<Decimal>,
    pub sqft_50: Option<Decimal>,
    pub sqft_75: Option<Decimal>,
    pub total_sqft: Decimal,
}
