//! DTOs de instancias de equipos
//!
//! Los campos específicos de categoría (ip/mac/serial, contadores de
//! impresora, asignatario) son opcionales; el coordinador valida formato
//! y unicidad donde la categoría lo exige.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::equipment::EquipmentInstance;

/// Request para desplegar una unidad de stock como equipo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipmentRequest {
    pub stock_item_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub site: String,

    #[validate(length(min = 2, max = 100))]
    pub department: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub assigned_to: Option<String>,

    pub ip: Option<String>,
    pub serial: Option<String>,
    pub mac: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub toner_level: Option<i32>,

    #[validate(range(min = 0))]
    pub impression_count: Option<i32>,

    pub notes: Option<String>,
}

/// Request de actualización: cambio de estado y/o campos. El estado
/// ausente significa "sin transición" (solo campos).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEquipmentRequest {
    pub status: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub site: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub department: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub assigned_to: Option<String>,

    pub ip: Option<String>,
    pub serial: Option<String>,
    pub mac: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub toner_level: Option<i32>,

    #[validate(range(min = 0))]
    pub impression_count: Option<i32>,

    pub notes: Option<String>,
}

/// Request de solo transición de estado
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

/// Filtros para listados de equipos
#[derive(Debug, Deserialize)]
pub struct EquipmentFilters {
    pub status: Option<String>,
    pub site: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de equipo
#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub category: String,
    pub stock_item_id: Uuid,
    pub site: String,
    pub department: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_by: Option<String>,
    pub status: String,
    pub ip: Option<String>,
    pub serial: Option<String>,
    pub mac: Option<String>,
    pub location: Option<String>,
    pub toner_level: Option<i32>,
    pub impression_count: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EquipmentInstance> for EquipmentResponse {
    fn from(instance: EquipmentInstance) -> Self {
        Self {
            id: instance.id,
            category: instance.category,
            stock_item_id: instance.stock_item_id,
            site: instance.site,
            department: instance.department,
            assigned_to: instance.assigned_to,
            assigned_by: instance.assigned_by,
            status: instance.status,
            ip: instance.ip,
            serial: instance.serial,
            mac: instance.mac,
            location: instance.location,
            toner_level: instance.toner_level,
            impression_count: instance.impression_count,
            notes: instance.notes,
            created_at: instance.created_at,
            updated_at: instance.updated_at,
        }
    }
}
