use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::project_controller::ProjectController;
use crate::dto::project_dto::{CreateProjectRequest, ProjectListQuery, ProjectResponse};
use crate::dto::revision_dto::StatusUpdateRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_project_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project).delete(delete_project))
        .route("/:id/status", put(update_project_status))
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let controller = ProjectController::new(state.pool.clone());
    Ok(Json(controller.list(query.status.as_deref()).await?))
}

async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let controller = ProjectController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_project(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ProjectResponse>, AppError> {
    let controller = ProjectController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_project_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let controller = ProjectController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, &request.status, &user.email).await?))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ProjectController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Project deleted".to_string())))
}
