//! Controlador de artículos de stock
//!
//! CRUD administrativo del catálogo. Los contadores solo se mueven por el
//! ajuste guardado de reposición/merma; el resto de movimientos nace de
//! las transiciones de equipos y los envíos de consumibles.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::stock_dto::{
    CreateStockItemRequest, RestockRequest, StockItemResponse, UpdateStockItemRequest,
};
use crate::dto::ApiResponse;
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::stock_repository::{NewStockItem, StockRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct StockController {
    repository: StockRepository,
    equipment_repository: EquipmentRepository,
}

impl StockController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StockRepository::new(pool.clone()),
            equipment_repository: EquipmentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateStockItemRequest,
    ) -> AppResult<ApiResponse<StockItemResponse>> {
        request.validate()?;

        let item = self
            .repository
            .create(NewStockItem {
                category: request.category,
                brand: request.brand,
                model: request.model,
                description: request.description,
                quantity: request.quantity,
                minimum_threshold: request.minimum_threshold,
                acquisition_date: request.acquisition_date,
                acquisition_value: request.acquisition_value,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            item.into(),
            "Artículo de stock creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<StockItemResponse> {
        let item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("StockItem", id))?;

        Ok(item.into())
    }

    pub async fn list(&self, category: Option<String>) -> AppResult<Vec<StockItemResponse>> {
        let items = self.repository.list(category).await?;

        Ok(items.into_iter().map(StockItemResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStockItemRequest,
    ) -> AppResult<ApiResponse<StockItemResponse>> {
        request.validate()?;

        let item = self
            .repository
            .update_details(
                id,
                request.brand,
                request.model,
                request.description,
                request.minimum_threshold,
                request.acquisition_date,
                request.acquisition_value,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            item.into(),
            "Artículo actualizado exitosamente".to_string(),
        ))
    }

    /// Reposición (delta positivo) o merma (delta negativo) de unidades.
    /// Solo toca total y disponibles; mermar por debajo de las unidades
    /// disponibles falla con `InsufficientStock`.
    pub async fn restock(
        &self,
        id: Uuid,
        request: RestockRequest,
    ) -> AppResult<ApiResponse<StockItemResponse>> {
        if request.delta == 0 {
            return Err(AppError::BadRequest(
                "El ajuste de unidades no puede ser cero".to_string(),
            ));
        }

        let item = self.repository.adjust_quantity(id, request.delta).await?;

        log::info!("Stock {} ajustado en {} unidades", id, request.delta);

        Ok(ApiResponse::success_with_message(
            item.into(),
            "Unidades ajustadas exitosamente".to_string(),
        ))
    }

    /// Un artículo solo puede eliminarse si ningún equipo lo referencia;
    /// la baja del último equipo ya lo elimina sola vía `retire`.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let references = self.equipment_repository.count_for_stock_item(id).await?;
        if references > 0 {
            return Err(AppError::Conflict(format!(
                "El artículo tiene {} equipos registrados; no puede eliminarse",
                references
            )));
        }

        self.repository.delete(id).await?;

        Ok(())
    }
}
