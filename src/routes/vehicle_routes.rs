use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{VehicleListQuery, VehicleListResponse, VehicleStatsResponse, VehicleUploadResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/stats", get(vehicle_stats))
}

/// `max_upload_bytes` reemplaza el límite de 2 MiB de axum solo en la subida
pub fn create_admin_vehicle_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_vehicles).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/:id", delete(delete_vehicle))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.pool.clone(), state.redis.clone())
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<VehicleListResponse>, AppError> {
    Ok(Json(controller(&state).list(query.make.as_deref()).await?))
}

async fn vehicle_stats(State(state): State<AppState>) -> Result<Json<VehicleStatsResponse>, AppError> {
    Ok(Json(controller(&state).stats().await?))
}

/// Campo multipart `file` con el .xlsx
async fn upload_vehicles(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VehicleUploadResponse>, AppError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read file: {}", e)))?;
            file = Some(bytes.to_vec());
            break;
        }
    }

    let file = file.ok_or_else(|| bad_request_error("No file uploaded"))?;
    Ok(Json(controller(&state).upload(file).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted".to_string())))
}
