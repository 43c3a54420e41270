use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{
    CreateUserRequest, ResetPasswordResponse, UpdateUserRequest, UserResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/vendedores", get(list_vendedores))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/reset-password", post(reset_password))
}

async fn list_users(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list(&actor).await?;
    Ok(Json(response))
}

async fn list_vendedores(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list_vendedores(&actor).await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.create(&actor, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Usuario creado exitosamente".to_string(),
    )))
}

async fn update_user(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(&actor, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_user(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(&actor, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}

async fn reset_password(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResetPasswordResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.reset_password(&actor, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Contraseña restablecida".to_string(),
    )))
}
