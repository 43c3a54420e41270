use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreatePhotoRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters,
    VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{AuthenticatedUser, OptionalUser};
use crate::models::photo::VehiclePhoto;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicle))
        .route("/marcas", get(list_marcas))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/fotos", post(add_photo))
        .route("/fotos/:photo_id/principal", put(set_photo_principal))
        .route("/fotos/:photo_id", delete(delete_photo))
}

async fn list_vehicles(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(filters, viewer.0.as_ref()).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id, viewer.0.as_ref()).await?;
    Ok(Json(response))
}

async fn list_marcas(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.distinct_marcas().await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(&actor, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Vehículo creado exitosamente".to_string(),
    )))
}

async fn update_vehicle(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(&actor, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(&actor, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn add_photo(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CreatePhotoRequest>,
) -> Result<Json<ApiResponse<VehiclePhoto>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.add_photo(&actor, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn set_photo_principal(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.set_photo_principal(&actor, photo_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Foto principal actualizada"
    })))
}

async fn delete_photo(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete_photo(&actor, photo_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Foto eliminada exitosamente"
    })))
}
