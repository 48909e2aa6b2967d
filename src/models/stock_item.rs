//! Modelo de StockItem
//!
//! Un artículo de stock representa N unidades intercambiables de un mismo
//! modelo de equipo (ej. "Cisco SG200", tóner "HP 26A") con tres contadores
//! que el ledger mantiene consistentes: `total_qty = available_qty +
//! assigned_qty`, los tres no negativos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Umbral de stock bajo cuando el artículo no define uno propio
pub const DEFAULT_MINIMUM_THRESHOLD: i32 = 5;

/// Mapea exactamente a la tabla stock_items
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockItem {
    pub id: Uuid,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub description: Option<String>,
    pub total_qty: i32,
    pub available_qty: i32,
    pub assigned_qty: i32,
    pub minimum_threshold: Option<i32>,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Un artículo está bajo de stock cuando las unidades disponibles caen
    /// al umbral configurado (o al umbral por defecto si no tiene)
    pub fn is_low_stock(&self) -> bool {
        self.available_qty <= self.minimum_threshold.unwrap_or(DEFAULT_MINIMUM_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(available: i32, threshold: Option<i32>) -> StockItem {
        StockItem {
            id: Uuid::new_v4(),
            category: "printer".to_string(),
            brand: "HP".to_string(),
            model: "26A".to_string(),
            description: None,
            total_qty: available,
            available_qty: available,
            assigned_qty: 0,
            minimum_threshold: threshold,
            acquisition_date: None,
            acquisition_value: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_with_explicit_threshold() {
        assert!(item(2, Some(2)).is_low_stock());
        assert!(!item(3, Some(2)).is_low_stock());
    }

    #[test]
    fn test_low_stock_falls_back_to_default() {
        assert!(item(5, None).is_low_stock());
        assert!(!item(6, None).is_low_stock());
    }
}
