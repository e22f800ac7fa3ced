use serde::{Deserialize, Serialize};

use crate::models::{PortfolioImage, PortfolioVideo, Product, Quote, StatusColor, StatusChange};

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioImagesResponse {
    pub images: Vec<PortfolioImage>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioVideosResponse {
    pub videos: Vec<PortfolioVideo>,
}

/// Contadores del panel de administración
#[derive(Debug, Default, Serialize, sqlx::FromRow)]
pub struct DashboardCounts {
    pub products: i64,
    pub images: i64,
    pub videos: i64,
    pub quotes: i64,
    pub new_quotes: i64,
    pub customers: i64,
    pub projects: i64,
    pub active_projects: i64,
}

#[derive(Debug, Serialize)]
pub struct RecentQuote {
    #[serde(flatten)]
    pub quote: Quote,
    pub color: StatusColor,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub counts: DashboardCounts,
    pub recent_quotes: Vec<RecentQuote>,
}

#[derive(Debug, Serialize)]
pub struct StatusHistoryResponse {
    pub entity: String,
    pub changes: Vec<StatusChange>,
}
