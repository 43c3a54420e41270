use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::sale_controller::SaleController;
use crate::dto::sale_dto::{
    CreateSaleRequest, RecordPaymentRequest, SaleFilters, SaleResponse, UpdateSaleRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::sale::Sale;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_sale_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales))
        .route("/", post(create_sale))
        .route("/:id", get(get_sale))
        .route("/:id", put(update_sale))
        .route("/:id/pagos", post(record_payment))
        .route("/:id/cancelar", post(cancel_sale))
        .route("/:id/pagar", post(mark_paid))
        .route("/:id/comision", put(mark_commission_paid))
}

#[derive(Debug, Deserialize)]
struct ComisionPagadaRequest {
    pagada: bool,
}

async fn list_sales(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Query(filters): Query<SaleFilters>,
) -> Result<Json<Vec<Sale>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.list(&actor, filters).await?;
    Ok(Json(response))
}

async fn get_sale(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.get_by_id(&actor, id).await?;
    Ok(Json(response))
}

async fn create_sale(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Json(request): Json<CreateSaleRequest>,
) -> Result<Json<ApiResponse<SaleResponse>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.create(&actor, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Venta registrada exitosamente".to_string(),
    )))
}

async fn update_sale(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSaleRequest>,
) -> Result<Json<ApiResponse<Sale>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.update(&actor, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn record_payment(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<SaleResponse>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.record_payment(&actor, id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Pago registrado exitosamente".to_string(),
    )))
}

async fn cancel_sale(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Sale>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.cancel(&actor, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Venta cancelada".to_string(),
    )))
}

async fn mark_paid(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Sale>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller.mark_paid(&actor, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Venta marcada como pagada".to_string(),
    )))
}

async fn mark_commission_paid(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ComisionPagadaRequest>,
) -> Result<Json<ApiResponse<Sale>>, AppError> {
    let controller = SaleController::new(state.pool.clone());
    let response = controller
        .mark_commission_paid(&actor, id, request.pagada)
        .await?;
    Ok(Json(ApiResponse::success(response)))
}
