//! Modelos del portfolio (imágenes y vídeos alojados en Google Drive)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioImage {
    pub id: Uuid,
    pub drive_id: String,
    pub alt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioVideo {
    pub id: Uuid,
    pub drive_id: String,
    pub title: String,
    pub category: String,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
