use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::customer_dto::{CustomerDetailResponse, CustomerIdResponse, UpsertCustomerRequest};
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new().route("/", post(upsert_customer))
}

pub fn create_admin_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
}

async fn upsert_customer(
    State(state): State<AppState>,
    Json(request): Json<UpsertCustomerRequest>,
) -> Result<Json<CustomerIdResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.upsert(request).await?))
}

async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}
