use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::catalog_controller::CatalogController;
use crate::dto::catalog_dto::{
    DashboardResponse, PortfolioImagesResponse, PortfolioQuery, PortfolioVideosResponse, ProductListResponse,
    StatusHistoryResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/portfolio/images", get(list_portfolio_images))
        .route("/portfolio/videos", get(list_portfolio_videos))
}

pub fn create_admin_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/status-history/:entity/:id", get(get_status_history))
}

async fn list_products(State(state): State<AppState>) -> Result<Json<ProductListResponse>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.products().await?))
}

async fn list_portfolio_images(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<PortfolioImagesResponse>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.portfolio_images(query).await?))
}

async fn list_portfolio_videos(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<PortfolioVideosResponse>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.portfolio_videos(query).await?))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.dashboard().await?))
}

async fn get_status_history(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<Json<StatusHistoryResponse>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.status_history(&entity, id).await?))
}
