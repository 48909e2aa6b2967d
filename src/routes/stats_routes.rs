use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::stats_controller::StatsController;
use crate::dto::stats_dto::{StatsFilters, StatsSummaryResponse};
use crate::dto::stock_dto::StockItemResponse;
use crate::models::status::EquipmentCategory;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stats_router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/low-stock", get(get_low_stock))
}

async fn get_summary(
    State(state): State<AppState>,
    Query(filters): Query<StatsFilters>,
) -> Result<Json<StatsSummaryResponse>, AppError> {
    let category = match filters.category.as_deref() {
        Some(raw) => Some(
            EquipmentCategory::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Categoría desconocida: {}", raw)))?,
        ),
        None => None,
    };

    let controller = StatsController::new(state.pool.clone());
    let response = controller.summary(category).await;
    Ok(Json(response))
}

async fn get_low_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockItemResponse>>, AppError> {
    let controller = StatsController::new(state.pool.clone());
    let response = controller.low_stock().await?;
    Ok(Json(response))
}
