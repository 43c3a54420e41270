use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{
    ComisionesResponse, MarcasResponse, PeriodoParams, ReporteMensualResponse,
    ResumenGeneralResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/mensual", get(reporte_mensual))
        .route("/resumen", get(resumen_general))
        .route("/comisiones", get(comisiones))
        .route("/marcas", get(marcas))
}

async fn reporte_mensual(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Query(params): Query<PeriodoParams>,
) -> Result<Json<ReporteMensualResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.mensual(&actor, params).await?;
    Ok(Json(response))
}

async fn resumen_general(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
) -> Result<Json<ResumenGeneralResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.resumen_general(&actor).await?;
    Ok(Json(response))
}

async fn comisiones(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Query(params): Query<PeriodoParams>,
) -> Result<Json<ComisionesResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.comisiones(&actor, params).await?;
    Ok(Json(response))
}

async fn marcas(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
) -> Result<Json<MarcasResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.marcas(&actor).await?;
    Ok(Json(response))
}
