use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::consumable_controller::ConsumableController;
use crate::dto::consumable_dto::{
    CreateShipmentRequest, ShipmentFilters, ShipmentResponse, UpdateShipmentRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_consumable_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_shipment))
        .route("/", get(list_shipments))
        .route("/:id", get(get_shipment))
        .route("/:id", put(update_shipment))
        .route("/:id", delete(delete_shipment))
}

async fn create_shipment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateShipmentRequest>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let actor = state.identity.current_user(&headers);
    let controller = ConsumableController::new(state.pool.clone());
    let response = controller.create(request, &actor).await?;
    Ok(Json(response))
}

async fn list_shipments(
    State(state): State<AppState>,
    Query(filters): Query<ShipmentFilters>,
) -> Result<Json<Vec<ShipmentResponse>>, AppError> {
    let controller = ConsumableController::new(state.pool.clone());
    let response = controller.list(filters.site).await?;
    Ok(Json(response))
}

async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let controller = ConsumableController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShipmentRequest>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ConsumableController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ConsumableController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Envío eliminado exitosamente"
    })))
}
