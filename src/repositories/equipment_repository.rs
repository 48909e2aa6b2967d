//! Repositorio de instancias de equipos
//!
//! Acceso a datos de la tabla equipment_instances para las seis
//! categorías. Las escrituras que afectan contadores reciben la
//! transacción del coordinador; las lecturas van directo al pool.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::equipment::EquipmentInstance;
use crate::models::status::EquipmentCategory;
use crate::utils::errors::{map_unique_violation, AppResult};

/// Datos para desplegar una instancia nueva
#[derive(Debug)]
pub struct NewInstance {
    pub category: EquipmentCategory,
    pub stock_item_id: Uuid,
    pub site: String,
    pub department: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_by: Option<String>,
    pub status: String,
    pub ip: Option<String>,
    pub serial: Option<String>,
    pub mac: Option<String>,
    pub location: Option<String>,
    pub toner_level: Option<i32>,
    pub impression_count: Option<i32>,
    pub notes: Option<String>,
}

/// Filtros para listados de equipos
#[derive(Debug, Default)]
pub struct InstanceFilters {
    pub status: Option<String>,
    pub site: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct EquipmentRepository {
    pool: PgPool,
}

impl EquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar dentro de la transacción del coordinador; una violación de
    /// unicidad del almacén se mapea al mismo error que el pre-check
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &NewInstance,
    ) -> AppResult<EquipmentInstance> {
        let instance = sqlx::query_as::<_, EquipmentInstance>(
            r#"
            INSERT INTO equipment_instances
                (id, category, stock_item_id, site, department, assigned_to, assigned_by, status,
                 ip, serial, mac, location, toner_level, impression_count, notes,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.category.as_str())
        .bind(data.stock_item_id)
        .bind(&data.site)
        .bind(&data.department)
        .bind(&data.assigned_to)
        .bind(&data.assigned_by)
        .bind(&data.status)
        .bind(&data.ip)
        .bind(&data.serial)
        .bind(&data.mac)
        .bind(&data.location)
        .bind(data.toner_level)
        .bind(data.impression_count)
        .bind(&data.notes)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                data.category.as_str(),
                &[
                    ("ip", data.ip.as_deref()),
                    ("serial", data.serial.as_deref()),
                    ("mac", data.mac.as_deref()),
                ],
            )
        })?;

        Ok(instance)
    }

    pub async fn find_by_id(
        &self,
        category: EquipmentCategory,
        id: Uuid,
    ) -> AppResult<Option<EquipmentInstance>> {
        let instance = sqlx::query_as::<_, EquipmentInstance>(
            "SELECT * FROM equipment_instances WHERE id = $1 AND category = $2",
        )
        .bind(id)
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(instance)
    }

    pub async fn list(
        &self,
        category: EquipmentCategory,
        filters: &InstanceFilters,
    ) -> AppResult<Vec<EquipmentInstance>> {
        let instances = sqlx::query_as::<_, EquipmentInstance>(
            r#"
            SELECT * FROM equipment_instances
            WHERE category = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR site = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(category.as_str())
        .bind(&filters.status)
        .bind(&filters.site)
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    /// Escribir estado y campos dentro de la transacción del coordinador.
    /// El llamador ya resolvió cada campo (valor nuevo o el vigente).
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        updated: &EquipmentInstance,
    ) -> AppResult<EquipmentInstance> {
        let instance = sqlx::query_as::<_, EquipmentInstance>(
            r#"
            UPDATE equipment_instances
            SET site = $2, department = $3, assigned_to = $4, assigned_by = $5, status = $6,
                ip = $7, serial = $8, mac = $9, location = $10, toner_level = $11,
                impression_count = $12, notes = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(updated.id)
        .bind(&updated.site)
        .bind(&updated.department)
        .bind(&updated.assigned_to)
        .bind(&updated.assigned_by)
        .bind(&updated.status)
        .bind(&updated.ip)
        .bind(&updated.serial)
        .bind(&updated.mac)
        .bind(&updated.location)
        .bind(updated.toner_level)
        .bind(updated.impression_count)
        .bind(&updated.notes)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &updated.category,
                &[
                    ("ip", updated.ip.as_deref()),
                    ("serial", updated.serial.as_deref()),
                    ("mac", updated.mac.as_deref()),
                ],
            )
        })?;

        Ok(instance)
    }

    pub async fn delete_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM equipment_instances WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Pre-check de unicidad: ¿otro equipo de la misma categoría ya usa
    /// este valor? La autoridad final es el índice único parcial.
    pub async fn field_in_use(
        &self,
        category: EquipmentCategory,
        field: &str,
        value: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let sql = match field {
            "ip" => {
                r#"SELECT EXISTS(SELECT 1 FROM equipment_instances
                   WHERE category = $1 AND ip = $2 AND ($3::uuid IS NULL OR id <> $3))"#
            }
            "serial" => {
                r#"SELECT EXISTS(SELECT 1 FROM equipment_instances
                   WHERE category = $1 AND serial = $2 AND ($3::uuid IS NULL OR id <> $3))"#
            }
            "mac" => {
                r#"SELECT EXISTS(SELECT 1 FROM equipment_instances
                   WHERE category = $1 AND mac = $2 AND ($3::uuid IS NULL OR id <> $3))"#
            }
            _ => return Ok(false),
        };

        let row: (bool,) = sqlx::query_as(sql)
            .bind(category.as_str())
            .bind(value)
            .bind(exclude)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    /// Instancias que referencian un artículo de stock (guarda de borrado)
    pub async fn count_for_stock_item(&self, stock_item_id: Uuid) -> AppResult<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM equipment_instances WHERE stock_item_id = $1")
                .bind(stock_item_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    /// Conteo de instancias por estado, opcionalmente de una categoría
    pub async fn count_by_status(
        &self,
        category: Option<EquipmentCategory>,
    ) -> AppResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*) FROM equipment_instances
            WHERE ($1::text IS NULL OR category = $1)
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Conteo de instancias por sede
    pub async fn count_by_site(&self) -> AppResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT site, COUNT(*) FROM equipment_instances
            GROUP BY site
            ORDER BY COUNT(*) DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
