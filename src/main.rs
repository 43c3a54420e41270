use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use dotenvy::dotenv;

use concesionaria_backend::config::environment::EnvironmentConfig;
use concesionaria_backend::database::connection::{create_pool, mask_database_url};
use concesionaria_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use concesionaria_backend::routes::create_app_router;
use concesionaria_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Concesionaria - Backend de gestión");
    info!("=====================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        info!("✅ Base de datos conectada: {}", mask_database_url(&url));
    }

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .map_err(|e| anyhow::anyhow!("Dirección inválida: {}", e))?;

    let state = AppState::new(pool, config);
    let app = create_app_router().layer(cors).with_state(state);

    info!("🚀 Servidor escuchando en http://{}", addr);
    info!("📋 Endpoints principales:");
    info!("   POST /api/auth/register - Registro de usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/vehiculos - Catálogo de vehículos");
    info!("   POST /api/ventas - Registrar venta");
    info!("   POST /api/ventas/:id/pagos - Registrar pago");
    info!("   GET  /api/reportes/mensual - Reporte mensual");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
