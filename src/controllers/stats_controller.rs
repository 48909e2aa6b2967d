//! Agregador de estadísticas
//!
//! Lecturas de solo-consulta para reporting: conteos por estado y sede,
//! totales de unidades, valor de adquisición y stock bajo. No usa
//! transacciones; un snapshot eventualmente consistente alcanza porque
//! estas cifras no alimentan decisiones del ledger. Cada sub-consulta
//! degrada a cero/vacío si falla: el resumen se entrega igual.

use sqlx::PgPool;

use crate::dto::stats_dto::{SiteCount, StatsSummaryResponse, StatusCount, UnitTotals};
use crate::dto::stock_dto::StockItemResponse;
use crate::models::status::EquipmentCategory;
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::stock_repository::StockRepository;
use crate::utils::errors::AppResult;

pub struct StatsController {
    stock_repository: StockRepository,
    equipment_repository: EquipmentRepository,
}

impl StatsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stock_repository: StockRepository::new(pool.clone()),
            equipment_repository: EquipmentRepository::new(pool),
        }
    }

    /// Resumen general del inventario, mejor-esfuerzo por sub-consulta
    pub async fn summary(&self, category: Option<EquipmentCategory>) -> StatsSummaryResponse {
        let (total, available, assigned) = match self.stock_repository.unit_totals().await {
            Ok(totals) => totals,
            Err(e) => {
                log::warn!("No se pudieron calcular los totales de unidades: {}", e);
                (0, 0, 0)
            }
        };

        let acquisition_value = match self.stock_repository.acquisition_value_sum().await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("No se pudo calcular el valor de adquisición: {}", e);
                Default::default()
            }
        };

        let by_status = match self.equipment_repository.count_by_status(category).await {
            Ok(rows) => rows
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            Err(e) => {
                log::warn!("No se pudo calcular el conteo por estado: {}", e);
                Vec::new()
            }
        };

        let by_site = match self.equipment_repository.count_by_site().await {
            Ok(rows) => rows
                .into_iter()
                .map(|(site, count)| SiteCount { site, count })
                .collect(),
            Err(e) => {
                log::warn!("No se pudo calcular el conteo por sede: {}", e);
                Vec::new()
            }
        };

        let low_stock = match self.stock_repository.low_stock().await {
            Ok(items) => items.into_iter().map(StockItemResponse::from).collect(),
            Err(e) => {
                log::warn!("No se pudo calcular el stock bajo: {}", e);
                Vec::new()
            }
        };

        StatsSummaryResponse {
            units: UnitTotals {
                total,
                available,
                assigned,
            },
            acquisition_value,
            by_status,
            by_site,
            low_stock,
        }
    }

    /// Listado de artículos bajo umbral; este endpoint sí propaga errores
    pub async fn low_stock(&self) -> AppResult<Vec<StockItemResponse>> {
        let items = self.stock_repository.low_stock().await?;

        Ok(items.into_iter().map(StockItemResponse::from).collect())
    }
}
