//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Insufficient stock for item {stock_item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        stock_item_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Duplicate {field} '{value}' in category {category}")]
    DuplicateField {
        category: String,
        field: String,
        value: String,
    },

    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: String, id: String },

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                eprintln!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                eprintln!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::InsufficientStock {
                stock_item_id,
                requested,
                available,
            } => {
                eprintln!(
                    "Insufficient stock: item {} requested {} available {}",
                    stock_item_id, requested, available
                );
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Insufficient Stock".to_string(),
                        message: "No hay unidades disponibles suficientes para esta operación"
                            .to_string(),
                        details: Some(json!({
                            "stock_item_id": stock_item_id,
                            "requested": requested,
                            "available": available,
                        })),
                        code: Some("INSUFFICIENT_STOCK".to_string()),
                    },
                )
            }

            AppError::DuplicateField {
                category,
                field,
                value,
            } => {
                eprintln!("Duplicate {} '{}' in {}", field, value, category);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate Field".to_string(),
                        message: format!("El campo {} ya está registrado para otro equipo", field),
                        details: Some(json!({
                            "category": category,
                            "field": field,
                            "value": value,
                        })),
                        code: Some("DUPLICATE_FIELD".to_string()),
                    },
                )
            }

            AppError::NotFound { kind, id } => {
                eprintln!("Resource not found: {} {}", kind, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: format!("{} with id '{}' not found", kind, id),
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::InvalidTransition { from, to } => {
                eprintln!("Invalid transition: {} -> {}", from, to);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Transition".to_string(),
                        message: format!("No se puede cambiar el estado de '{}' a '{}'", from, to),
                        details: Some(json!({ "from": from, "to": to })),
                        code: Some("INVALID_TRANSITION".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                eprintln!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                eprintln!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(kind: &str, id: impl ToString) -> AppError {
    AppError::NotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

/// Mapear violaciones de constraint UNIQUE (código 23505 de PostgreSQL)
/// al error de dominio `DuplicateField`. El constraint es la autoridad
/// final bajo inserciones concurrentes idénticas; el pre-check solo
/// existe para dar mejores mensajes.
pub fn map_unique_violation(
    err: sqlx::Error,
    category: &str,
    values: &[(&str, Option<&str>)],
) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23505") {
            // Los índices parciales se llaman uq_equipment_<categoria>_<campo>
            let field = db
                .constraint()
                .and_then(|c| c.rsplit('_').next())
                .unwrap_or("field")
                .to_string();
            let value = values
                .iter()
                .find(|(name, _)| *name == field)
                .and_then(|(_, v)| *v)
                .unwrap_or("")
                .to_string();
            return AppError::DuplicateField {
                category: category.to_string(),
                field,
                value,
            };
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_format() {
        let err = not_found_error("StockItem", "abc");
        assert_eq!(err.to_string(), "StockItem with id 'abc' not found");
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = AppError::InsufficientStock {
            stock_item_id: Uuid::nil(),
            requested: 3,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 3"));
        assert!(msg.contains("available 1"));
    }
}
