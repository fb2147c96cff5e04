mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{extract::State, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Fleet Tracking - Driver Duty & Fleet Resource Orchestrator");
    info!("=============================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada exitosamente");

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/duty", routes::duty_routes::create_duty_router())
        .nest("/api/journey", routes::journey_routes::create_journey_router())
        .nest("/api/stops", routes::stop_routes::create_stop_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&config))
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🧑‍✈️ Endpoints - Duty:");
    info!("   POST /api/duty/check-in - Check-in con inspección");
    info!("   POST /api/duty/status - Cambiar estado de turno");
    info!("   POST /api/duty/route/activate - Reanudar ruta");
    info!("   POST /api/duty/route/deactivate - Pausar ruta");
    info!("🚌 Endpoints - Journey:");
    info!("   POST /api/journey/event - Registrar evento de journey");
    info!("   GET  /api/journey/today/:bus_id - Journey del día");
    info!("📍 Endpoints - Stops:");
    info!("   POST /api/stops/complete - Marcar llegada a parada");
    info!("   POST /api/stops/depart - Marcar salida de parada");
    info!("   POST /api/stops/reset/:route_id - Reset diario de paradas");
    info!("   GET  /api/stops/completed/:route_id - Completadas hoy");
    info!("   GET  /api/stops/stops-away/:student_id - Paradas restantes");

    // Iniciar servidor
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

/// Health check con ping a la base de datos
async fn health_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "up",
        Err(_) => "down",
    };

    Json(json!({
        "service": "fleet-tracking",
        "status": "healthy",
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
