use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::equipment_controller::EquipmentController;
use crate::dto::equipment_dto::{
    ChangeStatusRequest, CreateEquipmentRequest, EquipmentFilters, EquipmentResponse,
    UpdateEquipmentRequest,
};
use crate::dto::ApiResponse;
use crate::repositories::equipment_repository::InstanceFilters;
use crate::models::status::EquipmentCategory;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_equipment_router() -> Router<AppState> {
    Router::new()
        .route("/:category", post(create_equipment))
        .route("/:category", get(list_equipment))
        .route("/:category/:id", get(get_equipment))
        .route("/:category/:id", put(update_equipment))
        .route("/:category/:id", delete(delete_equipment))
        .route("/:category/:id/status", put(change_status))
}

fn parse_category(raw: &str) -> Result<EquipmentCategory, AppError> {
    EquipmentCategory::parse(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Categoría desconocida: {}", raw)))
}

async fn create_equipment(
    State(state): State<AppState>,
    Path(category): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let category = parse_category(&category)?;
    let actor = state.identity.current_user(&headers);
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.create(category, request, &actor).await?;
    Ok(Json(response))
}

async fn list_equipment(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(filters): Query<EquipmentFilters>,
) -> Result<Json<Vec<EquipmentResponse>>, AppError> {
    let category = parse_category(&category)?;
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller
        .list(
            category,
            InstanceFilters {
                status: filters.status,
                site: filters.site,
                limit: filters.limit,
                offset: filters.offset,
            },
        )
        .await?;
    Ok(Json(response))
}

async fn get_equipment(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, Uuid)>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let category = parse_category(&category)?;
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.get_by_id(category, id).await?;
    Ok(Json(response))
}

async fn update_equipment(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let category = parse_category(&category)?;
    let actor = state.identity.current_user(&headers);
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller
        .apply_transition(category, id, request, &actor)
        .await?;
    Ok(Json(response))
}

/// Atajo de solo transición: equivale a un update con únicamente `status`
async fn change_status(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let category = parse_category(&category)?;
    let actor = state.identity.current_user(&headers);
    let controller = EquipmentController::new(state.pool.clone());
    let update = UpdateEquipmentRequest {
        status: Some(request.status),
        ..Default::default()
    };
    let response = controller
        .apply_transition(category, id, update, &actor)
        .await?;
    Ok(Json(response))
}

async fn delete_equipment(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = parse_category(&category)?;
    let controller = EquipmentController::new(state.pool.clone());
    controller.delete(category, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Equipo eliminado exitosamente"
    })))
}
