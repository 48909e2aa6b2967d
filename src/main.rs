use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use asset_inventory::config::environment::EnvironmentConfig;
use asset_inventory::database;
use asset_inventory::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use asset_inventory::routes;
use asset_inventory::services::identity_service::HeaderIdentityProvider;
use asset_inventory::services::report_service::DisabledRenderer;
use asset_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🖥️  Inventario de Equipos TI - Backend");
    info!("======================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // CORS según entorno
    let cors = if config.is_production() {
        cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    // Crear router de la API
    let app_state = AppState::new(
        pool,
        config.clone(),
        Arc::new(DisabledRenderer),
        Arc::new(HeaderIdentityProvider),
    );

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/stock", routes::stock_routes::create_stock_router())
        .nest(
            "/api/equipment",
            routes::equipment_routes::create_equipment_router(),
        )
        .nest(
            "/api/consumable",
            routes::consumable_routes::create_consumable_router(),
        )
        .nest("/api/stats", routes::stats_routes::create_stats_router())
        .nest("/api/reports", routes::report_routes::create_report_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📦 Stock:");
    info!("   POST /api/stock - Crear artículo");
    info!("   GET  /api/stock - Listar artículos");
    info!("   GET  /api/stock/:id - Obtener artículo");
    info!("   PUT  /api/stock/:id - Actualizar artículo");
    info!("   POST /api/stock/:id/restock - Ajustar unidades");
    info!("   DELETE /api/stock/:id - Eliminar artículo");
    info!("🖧 Equipos (dvr, mikrotik, printer, server, assigned, telephone):");
    info!("   POST /api/equipment/:category - Desplegar equipo");
    info!("   GET  /api/equipment/:category - Listar equipos");
    info!("   GET  /api/equipment/:category/:id - Obtener equipo");
    info!("   PUT  /api/equipment/:category/:id - Actualizar equipo");
    info!("   PUT  /api/equipment/:category/:id/status - Cambiar estado");
    info!("   DELETE /api/equipment/:category/:id - Eliminar equipo");
    info!("🧃 Consumibles:");
    info!("   POST /api/consumable - Crear envío");
    info!("   GET  /api/consumable - Listar envíos");
    info!("   PUT  /api/consumable/:id - Actualizar envío");
    info!("   DELETE /api/consumable/:id - Eliminar envío");
    info!("📊 Estadísticas y reportes:");
    info!("   GET  /api/stats/summary - Resumen de inventario");
    info!("   GET  /api/stats/low-stock - Artículos bajo umbral");
    info!("   GET  /api/reports/:template - Reporte PDF");

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

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "asset-inventory",
        "status": "healthy",
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
