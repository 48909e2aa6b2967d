//! Modelo de EquipmentInstance
//!
//! Una instancia es una unidad física desplegada bajo una de las seis
//! categorías, referenciando exactamente un artículo de stock. Muchas
//! instancias pueden apuntar al mismo artículo; cada una descuenta una
//! unidad de sus contadores mientras está en un estado asignado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::EquipmentStatus;
use crate::utils::errors::AppError;

/// Mapea exactamente a la tabla equipment_instances. Los campos
/// específicos de categoría (ip/serial/mac, contadores de impresora,
/// asignatario) son opcionales y solo se llenan donde aplican.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EquipmentInstance {
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

impl EquipmentInstance {
    /// Estado actual parseado; un valor desconocido en la fila es un bug
    /// de datos y se reporta como transición inválida
    pub fn parsed_status(&self) -> Result<EquipmentStatus, AppError> {
        EquipmentStatus::parse(&self.status).ok_or_else(|| AppError::InvalidTransition {
            from: self.status.clone(),
            to: self.status.clone(),
        })
    }

}
