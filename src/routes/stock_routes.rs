use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::stock_controller::StockController;
use crate::dto::stock_dto::{
    CreateStockItemRequest, RestockRequest, StockFilters, StockItemResponse,
    UpdateStockItemRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stock_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_stock_item))
        .route("/", get(list_stock_items))
        .route("/:id", get(get_stock_item))
        .route("/:id", put(update_stock_item))
        .route("/:id", delete(delete_stock_item))
        .route("/:id/restock", post(restock_stock_item))
}

async fn create_stock_item(
    State(state): State<AppState>,
    Json(request): Json<CreateStockItemRequest>,
) -> Result<Json<ApiResponse<StockItemResponse>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_stock_items(
    State(state): State<AppState>,
    Query(filters): Query<StockFilters>,
) -> Result<Json<Vec<StockItemResponse>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.list(filters.category).await?;
    Ok(Json(response))
}

async fn get_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StockItemResponse>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStockItemRequest>,
) -> Result<Json<ApiResponse<StockItemResponse>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn restock_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RestockRequest>,
) -> Result<Json<ApiResponse<StockItemResponse>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.restock(id, request).await?;
    Ok(Json(response))
}

async fn delete_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StockController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Artículo eliminado exitosamente"
    })))
}
