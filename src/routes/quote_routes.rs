use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quote_controller::{FlowStep, QuoteController};
use crate::dto::quote_dto::{CreateQuoteRequest, CreateQuoteResponse, QuoteListQuery, QuoteResponse, UpdateQuoteNotesRequest};
use crate::dto::revision_dto::StatusUpdateRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Formulario público
pub fn create_quote_router() -> Router<AppState> {
    Router::new().route("/", post(create_quote))
}

/// Gestión de presupuestos (admin)
pub fn create_admin_quote_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotes))
        .route("/:id", get(get_quote).delete(delete_quote))
        .route("/:id/status", put(update_status))
        .route("/:id/advance", post(advance_status))
        .route("/:id/back", post(move_back_status))
        .route("/:id/notes", put(update_notes))
}

async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Json<CreateQuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_quotes(
    State(state): State<AppState>,
    Query(query): Query<QuoteListQuery>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.list(query.status.as_deref()).await?))
}

async fn get_quote(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, &request.status, &user.email).await?))
}

async fn advance_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.step(id, FlowStep::Advance, &user.email).await?))
}

async fn move_back_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.step(id, FlowStep::Back, &user.email).await?))
}

async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteNotesRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    Ok(Json(controller.update_notes(id, request).await?))
}

async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Quote deleted".to_string())))
}
