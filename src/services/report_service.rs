//! Servicio de reportes PDF
//!
//! El renderizado (navegador headless o dibujo directo) es un colaborador
//! opaco: el núcleo arma los datos del reporte y entrega los bytes tal
//! cual. Este servicio no intersecta el camino transaccional del ledger.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use crate::controllers::stats_controller::StatsController;
use crate::utils::errors::{AppError, AppResult};

/// Renderizador opaco de reportes: recibe plantilla y datos, devuelve los
/// bytes del PDF. La implementación real vive fuera del núcleo.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, template: &str, data: &serde_json::Value) -> AppResult<Vec<u8>>;
}

/// Renderizador por defecto del binario: el real (navegador headless) se
/// inyecta en el despliegue; sin él, el endpoint de reportes responde 500.
pub struct DisabledRenderer;

#[async_trait]
impl ReportRenderer for DisabledRenderer {
    async fn render(&self, template: &str, _data: &serde_json::Value) -> AppResult<Vec<u8>> {
        Err(AppError::Internal(format!(
            "Renderizador de reportes no configurado (plantilla {})",
            template
        )))
    }
}

pub struct ReportService {
    stats: StatsController,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stats: StatsController::new(pool),
        }
    }

    /// Armar los datos de la plantilla y delegar el render al colaborador
    pub async fn generate(
        &self,
        renderer: &dyn ReportRenderer,
        template: &str,
    ) -> AppResult<Vec<u8>> {
        let data = match template {
            "inventory_summary" => {
                let summary = self.stats.summary(None).await;
                json!({
                    "title": "Resumen de inventario",
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "summary": summary,
                })
            }
            "low_stock" => {
                let items = self.stats.low_stock().await?;
                json!({
                    "title": "Artículos bajo stock mínimo",
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "items": items,
                })
            }
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Plantilla de reporte desconocida: {}",
                    template
                )))
            }
        };

        renderer.render(template, &data).await
    }
}
