use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

pub mod auth_routes;
pub mod report_routes;
pub mod sale_routes;
pub mod user_routes;
pub mod vehicle_routes;

/// Armar el router completo de la API
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/vehiculos", vehicle_routes::create_vehicle_router())
        .nest("/api/ventas", sale_routes::create_sale_router())
        .nest("/api/usuarios", user_routes::create_user_router())
        .nest("/api/reportes", report_routes::create_report_router())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "concesionaria-backend"
    }))
}
