//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: pool de conexiones, configuración y los
//! colaboradores externos inyectados (renderizador de reportes y
//! proveedor de identidad).

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::identity_service::IdentityProvider;
use crate::services::report_service::ReportRenderer;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub renderer: Arc<dyn ReportRenderer>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        renderer: Arc<dyn ReportRenderer>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            pool,
            config,
            renderer,
            identity,
        }
    }
}
