//! Modelo de Product
//!
//! Productos del catálogo público (wraps prediseñados y servicios).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Product - mapea a la tabla products
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    /// full_wrap | partial_wrap | hood | trunk | color_change | custom
    pub category: String,
    pub base_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub images: Vec<String>,
    pub featured: bool,
    /// active | draft | archived
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Precio que ve el cliente: el de oferta si existe
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.base_price)
    }
}
