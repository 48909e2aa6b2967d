//! DTOs de artículos de stock

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::stock_item::StockItem;

/// Request para crear un artículo de stock
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStockItemRequest {
    #[validate(length(min = 2, max = 50))]
    pub category: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub description: Option<String>,

    /// Unidades iniciales; todas entran disponibles
    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(range(min = 0))]
    pub minimum_threshold: Option<i32>,

    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_value: Option<Decimal>,
}

/// Request para actualizar campos descriptivos
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStockItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub minimum_threshold: Option<i32>,

    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_value: Option<Decimal>,
}

/// Request de reposición/merma de unidades
#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub delta: i32,
}

/// Filtros para listados de stock
#[derive(Debug, Deserialize)]
pub struct StockFilters {
    pub category: Option<String>,
}

/// Response de artículo de stock
#[derive(Debug, Serialize)]
pub struct StockItemResponse {
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
    pub low_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StockItem> for StockItemResponse {
    fn from(item: StockItem) -> Self {
        let low_stock = item.is_low_stock();
        Self {
            id: item.id,
            category: item.category,
            brand: item.brand,
            model: item.model,
            description: item.description,
            total_qty: item.total_qty,
            available_qty: item.available_qty,
            assigned_qty: item.assigned_qty,
            minimum_threshold: item.minimum_threshold,
            acquisition_date: item.acquisition_date,
            acquisition_value: item.acquisition_value,
            low_stock,
            created_at: item.created_at,
        }
    }
}
