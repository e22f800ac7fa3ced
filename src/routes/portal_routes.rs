use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::portal_controller::PortalController;
use crate::dto::portal_dto::{PortalDashboardResponse, PortalDataQuery, PortalOptions};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_portal_router() -> Router<AppState> {
    Router::new()
        .route("/data", get(get_portal_data))
        .route("/dashboard", get(get_portal_dashboard))
}

async fn get_portal_data(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<PortalDataQuery>,
) -> Result<Json<PortalOptions>, AppError> {
    let controller = PortalController::new(state.pool.clone());
    Ok(Json(controller.data(&user.email, query.data_type.as_deref()).await?))
}

async fn get_portal_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<PortalDashboardResponse>, AppError> {
    let controller = PortalController::new(state.pool.clone());
    Ok(Json(controller.dashboard(&user.email).await?))
}
