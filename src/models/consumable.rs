//! Modelo de envíos de consumibles
//!
//! Un envío agrupa N líneas (artículo, cantidad) despachadas juntas a una
//! sede. Las cantidades se reservan del stock en una sola transacción al
//! crear o actualizar; la eliminación del envío no devuelve stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Mapea a la tabla consumable_shipments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumableShipment {
    pub id: Uuid,
    pub site: String,
    pub description: Option<String>,
    pub sent_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mapea a la tabla consumable_lines
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumableLine {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub stock_item_id: Uuid,
    pub quantity: i32,
}
