//! Primitivas del ledger de stock
//!
//! Las cuatro operaciones atómicas sobre los tres contadores de un
//! artículo (total / disponible / asignado). Todas exigen una transacción
//! activa provista por el llamador: el cambio de contadores y la escritura
//! de la entidad que lo dispara deben confirmar o abortar juntos.
//!
//! La fila del artículo se relee con `SELECT ... FOR UPDATE` dentro de la
//! transacción; dos `reserve` concurrentes sobre el mismo artículo nunca
//! observan ambos disponibilidad suficiente.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::models::status::{LedgerEffect, StockBucket};
use crate::models::stock_item::StockItem;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Releer el artículo dentro de la transacción tomando el lock de fila
pub async fn lock_stock_item(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
) -> AppResult<StockItem> {
    let item = sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items WHERE id = $1 FOR UPDATE")
        .bind(stock_item_id)
        .fetch_optional(&mut **tx)
        .await?;

    item.ok_or_else(|| not_found_error("StockItem", stock_item_id))
}

/// Mover `qty` unidades de disponible a asignado. Falla con
/// `InsufficientStock` si no hay disponibilidad suficiente.
pub async fn reserve(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
    qty: i32,
) -> AppResult<()> {
    let item = lock_stock_item(tx, stock_item_id).await?;

    if item.available_qty < qty {
        return Err(AppError::InsufficientStock {
            stock_item_id,
            requested: qty,
            available: item.available_qty,
        });
    }

    sqlx::query(
        r#"
        UPDATE stock_items
        SET available_qty = available_qty - $2, assigned_qty = assigned_qty + $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(stock_item_id)
    .bind(qty)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Devolver `qty` unidades de asignado a disponible. Sin guarda propia:
/// espeja un `reserve` anterior y el CHECK de la tabla es el tope.
pub async fn release(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
    qty: i32,
) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE stock_items
        SET available_qty = available_qty + $2, assigned_qty = assigned_qty - $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(stock_item_id)
    .bind(qty)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found_error("StockItem", stock_item_id));
    }

    Ok(())
}

/// Sacar `qty` unidades del inventario de forma permanente, contra el
/// contador que las tenía. Si el total resultante llega a 0 el artículo
/// se elimina como efecto secundario (y el cascade arrastra sus
/// instancias, todas ya retiradas a esa altura); devuelve `true` en ese
/// caso para que el coordinador no intente re-escribir filas que ya no
/// existen.
pub async fn retire(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
    qty: i32,
    bucket: StockBucket,
) -> AppResult<bool> {
    let item = lock_stock_item(tx, stock_item_id).await?;

    if item.total_qty - qty <= 0 {
        sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(stock_item_id)
            .execute(&mut **tx)
            .await?;
        return Ok(true);
    }

    let sql = match bucket {
        StockBucket::Available => {
            r#"
            UPDATE stock_items
            SET total_qty = total_qty - $2, available_qty = available_qty - $2, updated_at = NOW()
            WHERE id = $1
            "#
        }
        StockBucket::Assigned => {
            r#"
            UPDATE stock_items
            SET total_qty = total_qty - $2, assigned_qty = assigned_qty - $2, updated_at = NOW()
            WHERE id = $1
            "#
        }
    };

    sqlx::query(sql)
        .bind(stock_item_id)
        .bind(qty)
        .execute(&mut **tx)
        .await?;

    Ok(false)
}

/// Inversa de `retire`: reintroducir `qty` unidades al total, en el
/// contador indicado. Reponer al contador de asignados no pasa por la
/// guarda de disponibilidad.
pub async fn restore(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
    qty: i32,
    bucket: StockBucket,
) -> AppResult<()> {
    let sql = match bucket {
        StockBucket::Available => {
            r#"
            UPDATE stock_items
            SET total_qty = total_qty + $2, available_qty = available_qty + $2, updated_at = NOW()
            WHERE id = $1
            "#
        }
        StockBucket::Assigned => {
            r#"
            UPDATE stock_items
            SET total_qty = total_qty + $2, assigned_qty = assigned_qty + $2, updated_at = NOW()
            WHERE id = $1
            "#
        }
    };

    let result = sqlx::query(sql)
        .bind(stock_item_id)
        .bind(qty)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found_error("StockItem", stock_item_id));
    }

    Ok(())
}

/// Aplicar el efecto de una transición de estado (una unidad). Devuelve
/// `true` si el efecto eliminó el artículo de stock (última unidad
/// retirada).
pub async fn apply_effect(
    tx: &mut Transaction<'_, Postgres>,
    stock_item_id: Uuid,
    effect: LedgerEffect,
) -> AppResult<bool> {
    match effect {
        LedgerEffect::None => Ok(false),
        LedgerEffect::Reserve => reserve(tx, stock_item_id, 1).await.map(|_| false),
        LedgerEffect::Release => release(tx, stock_item_id, 1).await.map(|_| false),
        LedgerEffect::Retire(bucket) => retire(tx, stock_item_id, 1, bucket).await,
        LedgerEffect::Restore(bucket) => restore(tx, stock_item_id, 1, bucket).await.map(|_| false),
    }
}
