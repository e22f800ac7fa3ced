use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::revision_controller::RevisionController;
use crate::dto::revision_dto::{CreateRevisionRequest, CreateRevisionResponse, RespondRevisionRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::Revision;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Alta de revisiones por el cliente autenticado
pub fn create_revision_router() -> Router<AppState> {
    Router::new().route("/", post(create_revision))
}

pub fn create_admin_revision_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_revisions))
        .route("/:id/respond", put(respond_revision))
}

async fn create_revision(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRevisionRequest>,
) -> Result<Json<CreateRevisionResponse>, AppError> {
    let controller = RevisionController::new(state.pool.clone());
    Ok(Json(controller.create(&user.email, request).await?))
}

async fn list_revisions(State(state): State<AppState>) -> Result<Json<Vec<Revision>>, AppError> {
    let controller = RevisionController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn respond_revision(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RespondRevisionRequest>,
) -> Result<Json<Revision>, AppError> {
    let controller = RevisionController::new(state.pool.clone());
    Ok(Json(controller.respond(id, request, &user.email).await?))
}
