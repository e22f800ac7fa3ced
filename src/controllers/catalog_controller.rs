use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::catalog_dto::{
    DashboardResponse, PortfolioImagesResponse, PortfolioQuery, PortfolioVideosResponse, ProductListResponse,
    RecentQuote, StatusHistoryResponse,
};
use crate::models::StatusDomain;
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::repositories::status_audit_repository::StatusAuditRepository;
use crate::utils::errors::{AppError, AppResult};

/// Presupuestos recientes que muestra el panel
pub const RECENT_QUOTES_LIMIT: i64 = 5;

pub struct CatalogController {
    repository: CatalogRepository,
    quotes: QuoteRepository,
    audit: StatusAuditRepository,
}

impl CatalogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CatalogRepository::new(pool.clone()),
            quotes: QuoteRepository::new(pool.clone()),
            audit: StatusAuditRepository::new(pool),
        }
    }

    pub async fn products(&self) -> AppResult<ProductListResponse> {
        Ok(ProductListResponse {
            products: self.repository.active_products().await?,
        })
    }

    pub async fn portfolio_images(&self, query: PortfolioQuery) -> AppResult<PortfolioImagesResponse> {
        let images = self
            .repository
            .portfolio_images(query.featured.unwrap_or(false), query.limit)
            .await?;
        Ok(PortfolioImagesResponse { images })
    }

    pub async fn portfolio_videos(&self, query: PortfolioQuery) -> AppResult<PortfolioVideosResponse> {
        let videos = self
            .repository
            .portfolio_videos(query.featured.unwrap_or(false), query.limit)
            .await?;
        Ok(PortfolioVideosResponse { videos })
    }

    /// Panel de administración: contadores y últimos presupuestos
    pub async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let counts = self.repository.dashboard_counts().await?;
        let recent_quotes = self
            .quotes
            .recent(RECENT_QUOTES_LIMIT)
            .await?
            .into_iter()
            .map(|quote| RecentQuote {
                color: StatusDomain::Quote.color(&quote.status),
                quote,
            })
            .collect();

        Ok(DashboardResponse { counts, recent_quotes })
    }

    pub async fn status_history(&self, entity: &str, id: Uuid) -> AppResult<StatusHistoryResponse> {
        let domain = StatusDomain::parse(entity)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown entity '{}'", entity)))?;

        // Pedido y pago comparten la fila de `orders`
        let table = match domain {
            StatusDomain::Order | StatusDomain::Payment => "orders",
            StatusDomain::Quote => "quotes",
            StatusDomain::Project => "projects",
            StatusDomain::Revision => "revisions",
        };

        let changes = self.audit.history(table, id).await?;
        Ok(StatusHistoryResponse {
            entity: table.to_string(),
            changes,
        })
    }
}
