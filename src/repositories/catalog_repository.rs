use sqlx::PgPool;

use crate::dto::catalog_dto::DashboardCounts;
use crate::models::{PortfolioImage, PortfolioVideo, Product};
use crate::utils::errors::AppError;

/// Productos, portfolio y contadores del panel
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn active_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE status = 'active' ORDER BY sort_order ASC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn portfolio_images(&self, featured_only: bool, limit: Option<i64>) -> Result<Vec<PortfolioImage>, AppError> {
        let images = sqlx::query_as::<_, PortfolioImage>(
            r#"
            SELECT * FROM portfolio_images
            WHERE (NOT $1 OR featured)
            ORDER BY sort_order ASC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(featured_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    pub async fn portfolio_videos(&self, featured_only: bool, limit: Option<i64>) -> Result<Vec<PortfolioVideo>, AppError> {
        let videos = sqlx::query_as::<_, PortfolioVideo>(
            r#"
            SELECT * FROM portfolio_videos
            WHERE (NOT $1 OR featured)
            ORDER BY sort_order ASC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(featured_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }

    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, AppError> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products) AS products,
                (SELECT COUNT(*) FROM portfolio_images) AS images,
                (SELECT COUNT(*) FROM portfolio_videos) AS videos,
                (SELECT COUNT(*) FROM quotes) AS quotes,
                (SELECT COUNT(*) FROM quotes WHERE status = 'new') AS new_quotes,
                (SELECT COUNT(*) FROM customers) AS customers,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM projects WHERE status <> 'completed') AS active_projects
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
