//! DTOs de envíos de consumibles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::consumable::{ConsumableLine, ConsumableShipment};

/// Línea de envío: artículo y cantidad a despachar
#[derive(Debug, Deserialize, Validate)]
pub struct ShipmentLineRequest {
    pub stock_item_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Request para crear un envío
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShipmentRequest {
    #[validate(length(min = 2, max = 100))]
    pub site: String,

    pub description: Option<String>,

    #[validate]
    pub lines: Vec<ShipmentLineRequest>,
}

/// Request para actualizar un envío: el set de líneas reemplaza al
/// vigente (el coordinador aplica el diff contra el stock)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShipmentRequest {
    #[validate(length(min = 2, max = 100))]
    pub site: Option<String>,

    pub description: Option<String>,

    #[validate]
    pub lines: Vec<ShipmentLineRequest>,
}

/// Filtros para listados de envíos
#[derive(Debug, Deserialize)]
pub struct ShipmentFilters {
    pub site: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShipmentLineResponse {
    pub stock_item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
    pub id: Uuid,
    pub site: String,
    pub description: Option<String>,
    pub sent_by: Option<String>,
    pub lines: Vec<ShipmentLineResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShipmentResponse {
    pub fn from_parts(shipment: ConsumableShipment, lines: Vec<ConsumableLine>) -> Self {
        Self {
            id: shipment.id,
            site: shipment.site,
            description: shipment.description,
            sent_by: shipment.sent_by,
            lines: lines
                .into_iter()
                .map(|l| ShipmentLineResponse {
                    stock_item_id: l.stock_item_id,
                    quantity: l.quantity,
                })
                .collect(),
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}
