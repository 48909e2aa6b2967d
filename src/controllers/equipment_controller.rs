//! Coordinador de transiciones de equipos
//!
//! Toda mutación de una instancia y su efecto sobre los contadores del
//! stock ocurre aquí, en una sola transacción: relectura del artículo con
//! lock de fila, efecto del ledger según la tabla de transiciones, y
//! escritura del nuevo estado. Cualquier error después de abrir la
//! transacción revierte ambas escrituras.
//!
//! Los pre-checks (formatos, unicidad) corren antes de abrir la
//! transacción para no gastar escrituras; bajo inserciones concurrentes
//! idénticas el índice único del almacén es la autoridad final.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::equipment_dto::{
    CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest,
};
use crate::dto::ApiResponse;
use crate::models::status::{
    deletion_effect, transition_effect, EquipmentCategory, EquipmentStatus,
};
use crate::repositories::equipment_repository::{
    EquipmentRepository, InstanceFilters, NewInstance,
};
use crate::repositories::stock_ledger;
use crate::services::identity_service::UserIdentity;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation;
use validator::Validate;

pub struct EquipmentController {
    pool: PgPool,
    repository: EquipmentRepository,
}

impl EquipmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EquipmentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Desplegar una unidad de stock como equipo: reserva 1 unidad del
    /// artículo y crea la instancia en estado `active`, todo en una
    /// transacción. Falla completa con `InsufficientStock` si no hay
    /// unidades disponibles.
    pub async fn create(
        &self,
        category: EquipmentCategory,
        request: CreateEquipmentRequest,
        actor: &UserIdentity,
    ) -> AppResult<ApiResponse<EquipmentResponse>> {
        request.validate()?;
        validate_field_formats(
            request.ip.as_deref(),
            request.mac.as_deref(),
            request.serial.as_deref(),
        )?;

        self.check_unique_fields(
            category,
            &[
                ("ip", request.ip.as_deref()),
                ("serial", request.serial.as_deref()),
                ("mac", request.mac.as_deref()),
            ],
            None,
        )
        .await?;

        let assigned_by = category.tracks_assignee().then(|| actor.name.clone());

        let mut tx = self.pool.begin().await?;

        stock_ledger::reserve(&mut tx, request.stock_item_id, 1).await?;

        let data = NewInstance {
            category,
            stock_item_id: request.stock_item_id,
            site: request.site,
            department: request.department,
            assigned_to: request.assigned_to,
            assigned_by,
            status: EquipmentStatus::Active.as_str().to_string(),
            ip: request.ip,
            serial: request.serial,
            mac: request.mac,
            location: request.location,
            toner_level: request.toner_level,
            impression_count: request.impression_count,
            notes: request.notes,
        };
        let instance = self.repository.insert(&mut tx, &data).await?;

        tx.commit().await?;

        log::info!(
            "Equipo {} registrado en categoría {} (stock {})",
            instance.id,
            category.as_str(),
            instance.stock_item_id
        );

        Ok(ApiResponse::success_with_message(
            instance.into(),
            "Equipo registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        category: EquipmentCategory,
        id: Uuid,
    ) -> AppResult<EquipmentResponse> {
        let instance = self
            .repository
            .find_by_id(category, id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", id))?;

        Ok(instance.into())
    }

    pub async fn list(
        &self,
        category: EquipmentCategory,
        filters: InstanceFilters,
    ) -> AppResult<Vec<EquipmentResponse>> {
        let instances = self.repository.list(category, &filters).await?;

        Ok(instances.into_iter().map(EquipmentResponse::from).collect())
    }

    /// Aplicar una transición de estado y/o actualización de campos.
    ///
    /// 1. Carga la instancia (lectura pre-transacción, solo validación).
    /// 2. Pre-check de unicidad sobre los campos que cambian.
    /// 3. Abre transacción.
    /// 4. Relee el artículo con lock de fila (dentro del ledger).
    /// 5. Aplica el efecto calculado de la tabla de transiciones.
    /// 6. Escribe estado y campos de la instancia.
    /// 7. Commit; cualquier error posterior al paso 3 revierte todo.
    pub async fn apply_transition(
        &self,
        category: EquipmentCategory,
        id: Uuid,
        request: UpdateEquipmentRequest,
        actor: &UserIdentity,
    ) -> AppResult<ApiResponse<EquipmentResponse>> {
        request.validate()?;
        validate_field_formats(
            request.ip.as_deref(),
            request.mac.as_deref(),
            request.serial.as_deref(),
        )?;

        let instance = self
            .repository
            .find_by_id(category, id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", id))?;

        let old_status = instance.parsed_status()?;
        let new_status = match request.status.as_deref() {
            Some(raw) => EquipmentStatus::parse(raw).ok_or_else(|| AppError::InvalidTransition {
                from: instance.status.clone(),
                to: raw.to_string(),
            })?,
            None => old_status,
        };

        self.check_unique_fields(
            category,
            &[
                ("ip", request.ip.as_deref()),
                ("serial", request.serial.as_deref()),
                ("mac", request.mac.as_deref()),
            ],
            Some(id),
        )
        .await?;

        let effect = transition_effect(category, old_status, new_status)?;

        // Sello del actor cuando cambia el asignatario
        let assigned_by = if category.tracks_assignee() && request.assigned_to.is_some() {
            Some(actor.name.clone())
        } else {
            instance.assigned_by.clone()
        };

        let mut updated = instance;
        updated.status = new_status.as_str().to_string();
        updated.assigned_by = assigned_by;
        updated.site = request.site.unwrap_or(updated.site);
        updated.department = request.department.or(updated.department);
        updated.assigned_to = request.assigned_to.or(updated.assigned_to);
        updated.ip = request.ip.or(updated.ip);
        updated.serial = request.serial.or(updated.serial);
        updated.mac = request.mac.or(updated.mac);
        updated.location = request.location.or(updated.location);
        updated.toner_level = request.toner_level.or(updated.toner_level);
        updated.impression_count = request.impression_count.or(updated.impression_count);
        updated.notes = request.notes.or(updated.notes);

        let mut tx = self.pool.begin().await?;

        let stock_deleted =
            stock_ledger::apply_effect(&mut tx, updated.stock_item_id, effect).await?;

        // Retirar la última unidad elimina el artículo y el cascade
        // arrastra esta instancia; no queda fila que actualizar
        let saved = if stock_deleted {
            updated
        } else {
            self.repository.update_in_tx(&mut tx, &updated).await?
        };

        tx.commit().await?;

        log::info!(
            "Equipo {} pasó de {} a {}",
            saved.id,
            old_status.as_str(),
            new_status.as_str()
        );

        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Equipo actualizado exitosamente".to_string(),
        ))
    }

    /// Eliminar una instancia. Un equipo activo devuelve su unidad al
    /// contador de disponibles; ocioso o de baja elimina sin efecto de
    /// stock (nunca la cargó, o ya salió del total).
    pub async fn delete(&self, category: EquipmentCategory, id: Uuid) -> AppResult<()> {
        let instance = self
            .repository
            .find_by_id(category, id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", id))?;

        let status = instance.parsed_status()?;
        let effect = deletion_effect(status);

        let mut tx = self.pool.begin().await?;

        stock_ledger::apply_effect(&mut tx, instance.stock_item_id, effect).await?;
        self.repository.delete_in_tx(&mut tx, instance.id).await?;

        tx.commit().await?;

        log::info!("Equipo {} eliminado (estado {})", id, status.as_str());

        Ok(())
    }

    async fn check_unique_fields(
        &self,
        category: EquipmentCategory,
        values: &[(&str, Option<&str>)],
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        for field in category.unique_fields() {
            let value = values
                .iter()
                .find(|(name, _)| name == field)
                .and_then(|(_, v)| *v);

            if let Some(value) = value {
                if self
                    .repository
                    .field_in_use(category, field, value, exclude)
                    .await?
                {
                    return Err(AppError::DuplicateField {
                        category: category.as_str().to_string(),
                        field: field.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Chequeos de formato para los campos de red; se acumulan en un solo
/// error de validación para reportar todos los campos inválidos juntos
fn validate_field_formats(
    ip: Option<&str>,
    mac: Option<&str>,
    serial: Option<&str>,
) -> AppResult<()> {
    let mut errors = validator::ValidationErrors::new();

    if let Some(ip) = ip {
        if let Err(e) = validation::validate_ip(ip) {
            errors.add("ip", e);
        }
    }
    if let Some(mac) = mac {
        if let Err(e) = validation::validate_mac(mac) {
            errors.add("mac", e);
        }
    }
    if let Some(serial) = serial {
        if let Err(e) = validation::validate_serial(serial) {
            errors.add("serial", e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_field_formats_accepts_valid() {
        assert!(validate_field_formats(
            Some("192.168.0.10"),
            Some("AA:BB:CC:DD:EE:FF"),
            Some("SN-1234")
        )
        .is_ok());
    }

    #[test]
    fn test_validate_field_formats_collects_all_errors() {
        let err = validate_field_formats(Some("999.1.1.1"), Some("nope"), Some("x")).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("ip"));
                assert!(fields.contains_key("mac"));
                assert!(fields.contains_key("serial"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_field_formats_skips_absent_fields() {
        assert!(validate_field_formats(None, None, None).is_ok());
    }
}
