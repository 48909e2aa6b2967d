//! DTOs del agregador de estadísticas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dto::stock_dto::StockItemResponse;

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SiteCount {
    pub site: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct UnitTotals {
    pub total: i64,
    pub available: i64,
    pub assigned: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsSummaryResponse {
    pub units: UnitTotals,
    pub acquisition_value: Decimal,
    pub by_status: Vec<StatusCount>,
    pub by_site: Vec<SiteCount>,
    pub low_stock: Vec<StockItemResponse>,
}

/// Filtros del resumen
#[derive(Debug, Deserialize)]
pub struct StatsFilters {
    pub category: Option<String>,
}
