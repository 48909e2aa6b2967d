//! Repositorio de envíos de consumibles
//!
//! Un envío y sus líneas se escriben siempre dentro de la transacción del
//! coordinador, junto con las reservas de stock que las líneas implican.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::consumable::{ConsumableLine, ConsumableShipment};
use crate::utils::errors::{not_found_error, AppResult};

pub struct ConsumableRepository {
    pool: PgPool,
}

impl ConsumableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        site: &str,
        description: Option<&str>,
        sent_by: Option<&str>,
    ) -> AppResult<ConsumableShipment> {
        let shipment = sqlx::query_as::<_, ConsumableShipment>(
            r#"
            INSERT INTO consumable_shipments (id, site, description, sent_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(site)
        .bind(description)
        .bind(sent_by)
        .fetch_one(&mut **tx)
        .await?;

        Ok(shipment)
    }

    pub async fn find_shipment(&self, id: Uuid) -> AppResult<Option<ConsumableShipment>> {
        let shipment =
            sqlx::query_as::<_, ConsumableShipment>("SELECT * FROM consumable_shipments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(shipment)
    }

    pub async fn list_shipments(&self, site: Option<String>) -> AppResult<Vec<ConsumableShipment>> {
        let shipments = sqlx::query_as::<_, ConsumableShipment>(
            r#"
            SELECT * FROM consumable_shipments
            WHERE ($1::text IS NULL OR site = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(site)
        .fetch_all(&self.pool)
        .await?;

        Ok(shipments)
    }

    pub async fn lines_for(&self, shipment_id: Uuid) -> AppResult<Vec<ConsumableLine>> {
        let lines = sqlx::query_as::<_, ConsumableLine>(
            "SELECT * FROM consumable_lines WHERE shipment_id = $1 ORDER BY stock_item_id",
        )
        .bind(shipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    pub async fn insert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment_id: Uuid,
        stock_item_id: Uuid,
        quantity: i32,
    ) -> AppResult<ConsumableLine> {
        let line = sqlx::query_as::<_, ConsumableLine>(
            r#"
            INSERT INTO consumable_lines (id, shipment_id, stock_item_id, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shipment_id)
        .bind(stock_item_id)
        .bind(quantity)
        .fetch_one(&mut **tx)
        .await?;

        Ok(line)
    }

    /// Reemplazo completo de líneas: los deltas del ledger ya se aplicaron
    /// línea a línea en la misma transacción
    pub async fn delete_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shipment_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM consumable_lines WHERE shipment_id = $1")
            .bind(shipment_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn touch_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        site: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<ConsumableShipment> {
        let shipment = sqlx::query_as::<_, ConsumableShipment>(
            r#"
            UPDATE consumable_shipments
            SET site = COALESCE($2, site), description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(site)
        .bind(description)
        .fetch_one(&mut **tx)
        .await?;

        Ok(shipment)
    }

    /// La eliminación de un envío no devuelve stock: las unidades ya se
    /// consumieron en la sede destino. Solo se eliminan las filas.
    pub async fn delete_shipment(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM consumable_shipments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("ConsumableShipment", id));
        }

        Ok(())
    }
}
