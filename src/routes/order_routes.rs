use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::order_dto::{OrderResponse, UpdateOrderStatusRequest};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/status", put(update_order_status))
}

async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_order(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_order_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, request, &user.email).await?))
}
