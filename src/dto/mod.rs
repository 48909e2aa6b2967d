//! DTOs de la API
//!
//! Requests con derives de validación y responses serializables. Las
//! mutaciones envuelven su resultado en `ApiResponse`.

pub mod consumable_dto;
pub mod equipment_dto;
pub mod stats_dto;
pub mod stock_dto;

use serde::Serialize;

/// Response genérica de mutaciones
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
