//! Coordinador de envíos de consumibles
//!
//! Un envío reserva N cantidades de distintos artículos en una sola
//! transacción; la actualización aplica el diff entre líneas viejas y
//! nuevas; si cualquier línea no tiene stock suficiente se revierte el
//! envío completo (todo o nada).

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::consumable_dto::{
    CreateShipmentRequest, ShipmentResponse, UpdateShipmentRequest,
};
use crate::dto::ApiResponse;
use crate::repositories::consumable_repository::ConsumableRepository;
use crate::repositories::stock_ledger;
use crate::services::identity_service::UserIdentity;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ConsumableController {
    pool: PgPool,
    repository: ConsumableRepository,
}

impl ConsumableController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ConsumableRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear un envío con sus líneas, reservando cada cantidad. La
    /// primera línea sin stock suficiente aborta el envío entero y ningún
    /// contador queda tocado.
    pub async fn create(
        &self,
        request: CreateShipmentRequest,
        actor: &UserIdentity,
    ) -> AppResult<ApiResponse<ShipmentResponse>> {
        request.validate()?;
        validate_lines(&request.lines.iter().map(|l| (l.stock_item_id, l.quantity)).collect::<Vec<_>>())?;

        let mut tx = self.pool.begin().await?;

        let shipment = self
            .repository
            .insert_shipment(
                &mut tx,
                &request.site,
                request.description.as_deref(),
                Some(&actor.name),
            )
            .await?;

        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            stock_ledger::reserve(&mut tx, line.stock_item_id, line.quantity).await?;
            let saved = self
                .repository
                .insert_line(&mut tx, shipment.id, line.stock_item_id, line.quantity)
                .await?;
            lines.push(saved);
        }

        tx.commit().await?;

        log::info!(
            "Envío de consumibles {} creado con {} líneas",
            shipment.id,
            lines.len()
        );

        Ok(ApiResponse::success_with_message(
            ShipmentResponse::from_parts(shipment, lines),
            "Envío registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ShipmentResponse> {
        let shipment = self
            .repository
            .find_shipment(id)
            .await?
            .ok_or_else(|| not_found_error("ConsumableShipment", id))?;
        let lines = self.repository.lines_for(id).await?;

        Ok(ShipmentResponse::from_parts(shipment, lines))
    }

    pub async fn list(&self, site: Option<String>) -> AppResult<Vec<ShipmentResponse>> {
        let shipments = self.repository.list_shipments(site).await?;

        let mut responses = Vec::with_capacity(shipments.len());
        for shipment in shipments {
            let lines = self.repository.lines_for(shipment.id).await?;
            responses.push(ShipmentResponse::from_parts(shipment, lines));
        }

        Ok(responses)
    }

    /// Actualizar las líneas de un envío aplicando el diff contra las
    /// vigentes: líneas quitadas devuelven su cantidad, líneas cambiadas
    /// aplican el delta con signo, líneas nuevas reservan. Todo dentro de
    /// una transacción; cualquier falta de stock revierte el diff entero.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateShipmentRequest,
    ) -> AppResult<ApiResponse<ShipmentResponse>> {
        request.validate()?;
        validate_lines(&request.lines.iter().map(|l| (l.stock_item_id, l.quantity)).collect::<Vec<_>>())?;

        let shipment = self
            .repository
            .find_shipment(id)
            .await?
            .ok_or_else(|| not_found_error("ConsumableShipment", id))?;
        let old_lines = self.repository.lines_for(id).await?;

        let old_by_item: HashMap<Uuid, i32> = old_lines
            .iter()
            .map(|l| (l.stock_item_id, l.quantity))
            .collect();
        let new_by_item: HashMap<Uuid, i32> = request
            .lines
            .iter()
            .map(|l| (l.stock_item_id, l.quantity))
            .collect();

        let mut tx = self.pool.begin().await?;

        // Líneas quitadas: la cantidad vuelve a disponibles
        for (item, old_qty) in &old_by_item {
            if !new_by_item.contains_key(item) {
                stock_ledger::release(&mut tx, *item, *old_qty).await?;
            }
        }

        // Líneas cambiadas o nuevas: delta con signo, guardado al reservar
        for (item, new_qty) in &new_by_item {
            match old_by_item.get(item) {
                Some(old_qty) => {
                    let delta = new_qty - old_qty;
                    if delta > 0 {
                        stock_ledger::reserve(&mut tx, *item, delta).await?;
                    } else if delta < 0 {
                        stock_ledger::release(&mut tx, *item, -delta).await?;
                    }
                }
                None => {
                    stock_ledger::reserve(&mut tx, *item, *new_qty).await?;
                }
            }
        }

        self.repository.delete_lines(&mut tx, id).await?;
        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let saved = self
                .repository
                .insert_line(&mut tx, shipment.id, line.stock_item_id, line.quantity)
                .await?;
            lines.push(saved);
        }

        let shipment = self
            .repository
            .touch_shipment(
                &mut tx,
                id,
                request.site.as_deref(),
                request.description.as_deref(),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            ShipmentResponse::from_parts(shipment, lines),
            "Envío actualizado exitosamente".to_string(),
        ))
    }

    /// La eliminación no devuelve stock: las unidades enviadas se
    /// consumieron en destino. Solo desaparecen las filas del envío.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete_shipment(id).await?;

        log::info!("Envío de consumibles {} eliminado (sin retorno de stock)", id);

        Ok(())
    }
}

/// Las líneas no pueden estar vacías ni repetir artículo; el diff por
/// artículo exige una línea por stock_item_id
fn validate_lines(lines: &[(Uuid, i32)]) -> AppResult<()> {
    if lines.is_empty() {
        return Err(AppError::BadRequest(
            "El envío debe tener al menos una línea".to_string(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for (item, qty) in lines {
        if *qty <= 0 {
            return Err(AppError::BadRequest(
                "Las cantidades deben ser positivas".to_string(),
            ));
        }
        if !seen.insert(*item) {
            return Err(AppError::BadRequest(format!(
                "Artículo repetido en las líneas del envío: {}",
                item
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lines_rejects_empty() {
        assert!(validate_lines(&[]).is_err());
    }

    #[test]
    fn test_validate_lines_rejects_duplicates() {
        let item = Uuid::new_v4();
        assert!(validate_lines(&[(item, 1), (item, 2)]).is_err());
    }

    #[test]
    fn test_validate_lines_rejects_non_positive() {
        assert!(validate_lines(&[(Uuid::new_v4(), 0)]).is_err());
        assert!(validate_lines(&[(Uuid::new_v4(), -3)]).is_err());
    }

    #[test]
    fn test_validate_lines_accepts_distinct_positive() {
        assert!(validate_lines(&[(Uuid::new_v4(), 3), (Uuid::new_v4(), 2)]).is_ok());
    }
}
