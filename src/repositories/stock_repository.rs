//! Repositorio de artículos de stock
//!
//! CRUD sobre la tabla stock_items. Los contadores solo se mutan aquí en
//! el ajuste administrativo guardado (`adjust_quantity`); el resto de
//! mutaciones de contadores pasa por las primitivas del ledger.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::stock_item::StockItem;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Datos para crear un artículo nuevo
#[derive(Debug)]
pub struct NewStockItem {
    pub category: String,
    pub brand: String,
    pub model: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub minimum_threshold: Option<i32>,
    pub acquisition_date: Option<chrono::NaiveDate>,
    pub acquisition_value: Option<Decimal>,
}

pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un artículo; todas las unidades iniciales entran disponibles
    pub async fn create(&self, data: NewStockItem) -> AppResult<StockItem> {
        let item = sqlx::query_as::<_, StockItem>(
            r#"
            INSERT INTO stock_items
                (id, category, brand, model, description, total_qty, available_qty, assigned_qty,
                 minimum_threshold, acquisition_date, acquisition_value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6, 0, $7, $8, $9, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.category)
        .bind(data.brand)
        .bind(data.model)
        .bind(data.description)
        .bind(data.quantity)
        .bind(data.minimum_threshold)
        .bind(data.acquisition_date)
        .bind(data.acquisition_value)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockItem>> {
        let item = sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    pub async fn list(&self, category: Option<String>) -> AppResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT * FROM stock_items
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY brand, model
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Actualizar campos descriptivos; los contadores no se tocan aquí
    pub async fn update_details(
        &self,
        id: Uuid,
        brand: Option<String>,
        model: Option<String>,
        description: Option<String>,
        minimum_threshold: Option<i32>,
        acquisition_date: Option<chrono::NaiveDate>,
        acquisition_value: Option<Decimal>,
    ) -> AppResult<StockItem> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("StockItem", id))?;

        let item = sqlx::query_as::<_, StockItem>(
            r#"
            UPDATE stock_items
            SET brand = $2, model = $3, description = $4, minimum_threshold = $5,
                acquisition_date = $6, acquisition_value = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(brand.unwrap_or(current.brand))
        .bind(model.unwrap_or(current.model))
        .bind(description.or(current.description))
        .bind(minimum_threshold.or(current.minimum_threshold))
        .bind(acquisition_date.or(current.acquisition_date))
        .bind(acquisition_value.or(current.acquisition_value))
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Ajuste administrativo de unidades: `delta` positivo repone stock,
    /// negativo lo merma. Solo mueve total y disponibles, con guarda de no
    /// negatividad sobre ambos, en su propia transacción con lock de fila.
    pub async fn adjust_quantity(&self, id: Uuid, delta: i32) -> AppResult<StockItem> {
        let mut tx = self.pool.begin().await?;

        let current = crate::repositories::stock_ledger::lock_stock_item(&mut tx, id).await?;

        if current.available_qty + delta < 0 {
            return Err(AppError::InsufficientStock {
                stock_item_id: id,
                requested: -delta,
                available: current.available_qty,
            });
        }

        let item = sqlx::query_as::<_, StockItem>(
            r#"
            UPDATE stock_items
            SET total_qty = total_qty + $2, available_qty = available_qty + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("StockItem", id));
        }

        Ok(())
    }

    /// Artículos bajo el umbral de stock (propio, o 5 por defecto)
    pub async fn low_stock(&self) -> AppResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT * FROM stock_items
            WHERE available_qty <= COALESCE(minimum_threshold, 5)
            ORDER BY available_qty ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Totales de unidades: (total, disponibles, asignadas)
    pub async fn unit_totals(&self) -> AppResult<(i64, i64, i64)> {
        let row: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_qty), 0), COALESCE(SUM(available_qty), 0),
                   COALESCE(SUM(assigned_qty), 0)
            FROM stock_items
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Suma del valor de adquisición de todo el inventario
    pub async fn acquisition_value_sum(&self) -> AppResult<Decimal> {
        let row: (Option<Decimal>,) =
            sqlx::query_as("SELECT SUM(acquisition_value * total_qty) FROM stock_items")
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0.unwrap_or_default())
    }
}
