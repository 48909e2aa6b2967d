//! Estados de equipos y tabla de transiciones
//!
//! Las seis categorías de equipos comparten la misma máquina de estados;
//! lo que cambia por categoría es el dominio de estados permitidos y los
//! campos con unicidad. Cada par (estado anterior, estado nuevo) define un
//! efecto sobre los contadores del artículo de stock (`LedgerEffect`), que
//! el coordinador aplica dentro de la misma transacción que el cambio de
//! estado del equipo.

use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Categorías de equipos soportadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Dvr,
    Mikrotik,
    Printer,
    Server,
    Assigned,
    Telephone,
}

/// Estado de un equipo desplegado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Inactive,
    Maintenance,
    Decommissioned,
    Returned,
    Obsolete,
    OutOfToner,
}

/// Contador del stock sobre el que opera un retiro o una reposición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockBucket {
    Available,
    Assigned,
}

/// Efecto de una transición de estado sobre los contadores del stock.
/// `Reserve` es la única operación con guarda de disponibilidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    None,
    Reserve,
    Release,
    Retire(StockBucket),
    Restore(StockBucket),
}

/// Clasificación interna de estados: un equipo `active` tiene una unidad
/// cargada al contador de asignados; los estados ociosos la devuelven a
/// disponibles; los estados de baja la sacan del total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Assigned,
    Idle,
    Retired,
    Neutral,
}

impl EquipmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCategory::Dvr => "dvr",
            EquipmentCategory::Mikrotik => "mikrotik",
            EquipmentCategory::Printer => "printer",
            EquipmentCategory::Server => "server",
            EquipmentCategory::Assigned => "assigned",
            EquipmentCategory::Telephone => "telephone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dvr" => Some(EquipmentCategory::Dvr),
            "mikrotik" => Some(EquipmentCategory::Mikrotik),
            "printer" => Some(EquipmentCategory::Printer),
            "server" => Some(EquipmentCategory::Server),
            "assigned" => Some(EquipmentCategory::Assigned),
            "telephone" => Some(EquipmentCategory::Telephone),
            _ => None,
        }
    }

    /// Dominio de estados válidos para la categoría
    pub fn allowed_statuses(&self) -> &'static [EquipmentStatus] {
        match self {
            EquipmentCategory::Dvr | EquipmentCategory::Mikrotik | EquipmentCategory::Server => &[
                EquipmentStatus::Active,
                EquipmentStatus::Inactive,
                EquipmentStatus::Maintenance,
                EquipmentStatus::Decommissioned,
            ],
            EquipmentCategory::Printer => &[
                EquipmentStatus::Active,
                EquipmentStatus::Inactive,
                EquipmentStatus::Maintenance,
                EquipmentStatus::Obsolete,
                EquipmentStatus::OutOfToner,
            ],
            EquipmentCategory::Assigned | EquipmentCategory::Telephone => &[
                EquipmentStatus::Active,
                EquipmentStatus::Returned,
                EquipmentStatus::Obsolete,
            ],
        }
    }

    /// Campos con unicidad por categoría (entre instancias de la misma
    /// categoría). El resto de categorías no lleva pre-check.
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            EquipmentCategory::Dvr | EquipmentCategory::Mikrotik => &["ip", "serial", "mac"],
            EquipmentCategory::Printer => &["ip", "serial"],
            _ => &[],
        }
    }

    /// Las categorías asignables a personas llevan sello de actor
    pub fn tracks_assignee(&self) -> bool {
        matches!(
            self,
            EquipmentCategory::Assigned | EquipmentCategory::Telephone
        )
    }
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Inactive => "inactive",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Decommissioned => "decommissioned",
            EquipmentStatus::Returned => "returned",
            EquipmentStatus::Obsolete => "obsolete",
            EquipmentStatus::OutOfToner => "out_of_toner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(EquipmentStatus::Active),
            "inactive" => Some(EquipmentStatus::Inactive),
            "maintenance" => Some(EquipmentStatus::Maintenance),
            "decommissioned" => Some(EquipmentStatus::Decommissioned),
            "returned" => Some(EquipmentStatus::Returned),
            "obsolete" => Some(EquipmentStatus::Obsolete),
            "out_of_toner" => Some(EquipmentStatus::OutOfToner),
            _ => None,
        }
    }

    fn class(&self) -> StatusClass {
        match self {
            EquipmentStatus::Active => StatusClass::Assigned,
            EquipmentStatus::Inactive
            | EquipmentStatus::Maintenance
            | EquipmentStatus::Returned => StatusClass::Idle,
            EquipmentStatus::Decommissioned | EquipmentStatus::Obsolete => StatusClass::Retired,
            EquipmentStatus::OutOfToner => StatusClass::Neutral,
        }
    }

    /// Un equipo dado de baja ya no tiene unidad en el stock
    pub fn is_retired(&self) -> bool {
        self.class() == StatusClass::Retired
    }
}

/// Calcula el efecto sobre el stock de pasar `old -> new` en `category`.
///
/// Invariantes del modelo de contadores:
/// - `Reserve`/`Release` mueven una unidad entre disponible y asignado sin
///   tocar el total.
/// - `Retire`/`Restore` sacan o reintroducen la unidad del total, contra el
///   contador que la tenía (o la recibe).
/// - `retired -> active` repone directamente al contador de asignados sin
///   pasar por la guarda de disponibilidad: reactivar una baja siempre
///   procede, la unidad re-entra al inventario ya asignada.
pub fn transition_effect(
    category: EquipmentCategory,
    old: EquipmentStatus,
    new: EquipmentStatus,
) -> Result<LedgerEffect, AppError> {
    let allowed = category.allowed_statuses();
    if !allowed.contains(&old) || !allowed.contains(&new) {
        return Err(AppError::InvalidTransition {
            from: old.as_str().to_string(),
            to: new.as_str().to_string(),
        });
    }

    if old == new {
        return Ok(LedgerEffect::None);
    }

    // Las transiciones hacia/desde out_of_toner son neutras para el stock:
    // la impresora sigue ocupando la misma unidad mientras le cambian el tóner.
    let effect = match (old.class(), new.class()) {
        (StatusClass::Neutral, _) | (_, StatusClass::Neutral) => LedgerEffect::None,
        (a, b) if a == b => LedgerEffect::None,
        (StatusClass::Assigned, StatusClass::Idle) => LedgerEffect::Release,
        (StatusClass::Idle, StatusClass::Assigned) => LedgerEffect::Reserve,
        (StatusClass::Assigned, StatusClass::Retired) => {
            LedgerEffect::Retire(StockBucket::Assigned)
        }
        (StatusClass::Idle, StatusClass::Retired) => LedgerEffect::Retire(StockBucket::Available),
        (StatusClass::Retired, StatusClass::Assigned) => {
            LedgerEffect::Restore(StockBucket::Assigned)
        }
        (StatusClass::Retired, StatusClass::Idle) => LedgerEffect::Restore(StockBucket::Available),
        _ => {
            return Err(AppError::InvalidTransition {
                from: old.as_str().to_string(),
                to: new.as_str().to_string(),
            })
        }
    };

    Ok(effect)
}

/// Efecto sobre el stock al eliminar una instancia: solo un equipo activo
/// devuelve su unidad a disponibles; los ociosos nunca la cargaron a
/// asignados y las bajas ya salieron del total.
pub fn deletion_effect(status: EquipmentStatus) -> LedgerEffect {
    match status {
        EquipmentStatus::Active => LedgerEffect::Release,
        _ => LedgerEffect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for cat in [
            EquipmentCategory::Dvr,
            EquipmentCategory::Mikrotik,
            EquipmentCategory::Printer,
            EquipmentCategory::Server,
            EquipmentCategory::Assigned,
            EquipmentCategory::Telephone,
        ] {
            assert_eq!(EquipmentCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(EquipmentCategory::parse("laptop"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EquipmentStatus::Active,
            EquipmentStatus::Inactive,
            EquipmentStatus::Maintenance,
            EquipmentStatus::Decommissioned,
            EquipmentStatus::Returned,
            EquipmentStatus::Obsolete,
            EquipmentStatus::OutOfToner,
        ] {
            assert_eq!(EquipmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EquipmentStatus::parse("broken"), None);
    }

    #[test]
    fn test_same_status_is_noop() {
        let effect = transition_effect(
            EquipmentCategory::Dvr,
            EquipmentStatus::Active,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::None);
    }

    #[test]
    fn test_active_to_idle_releases() {
        for idle in [EquipmentStatus::Inactive, EquipmentStatus::Maintenance] {
            let effect =
                transition_effect(EquipmentCategory::Server, EquipmentStatus::Active, idle)
                    .unwrap();
            assert_eq!(effect, LedgerEffect::Release);
        }
    }

    #[test]
    fn test_idle_to_active_reserves() {
        let effect = transition_effect(
            EquipmentCategory::Mikrotik,
            EquipmentStatus::Maintenance,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Reserve);
    }

    #[test]
    fn test_decommission_from_active_retires_assigned() {
        let effect = transition_effect(
            EquipmentCategory::Dvr,
            EquipmentStatus::Active,
            EquipmentStatus::Decommissioned,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Retire(StockBucket::Assigned));
    }

    #[test]
    fn test_decommission_from_idle_retires_available() {
        let effect = transition_effect(
            EquipmentCategory::Dvr,
            EquipmentStatus::Inactive,
            EquipmentStatus::Decommissioned,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Retire(StockBucket::Available));
    }

    #[test]
    fn test_reactivation_restores_assigned_without_guard() {
        // Reactivar una baja repone directo al contador de asignados; no
        // existe variante con guarda de disponibilidad para este camino.
        let effect = transition_effect(
            EquipmentCategory::Dvr,
            EquipmentStatus::Decommissioned,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Restore(StockBucket::Assigned));

        let effect = transition_effect(
            EquipmentCategory::Telephone,
            EquipmentStatus::Obsolete,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Restore(StockBucket::Assigned));
    }

    #[test]
    fn test_decommissioned_to_idle_restores_available() {
        let effect = transition_effect(
            EquipmentCategory::Server,
            EquipmentStatus::Decommissioned,
            EquipmentStatus::Maintenance,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Restore(StockBucket::Available));
    }

    #[test]
    fn test_idle_to_idle_is_ledger_neutral() {
        let effect = transition_effect(
            EquipmentCategory::Server,
            EquipmentStatus::Inactive,
            EquipmentStatus::Maintenance,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::None);
    }

    #[test]
    fn test_out_of_toner_is_ledger_neutral() {
        let effect = transition_effect(
            EquipmentCategory::Printer,
            EquipmentStatus::Active,
            EquipmentStatus::OutOfToner,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::None);

        let effect = transition_effect(
            EquipmentCategory::Printer,
            EquipmentStatus::OutOfToner,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::None);
    }

    #[test]
    fn test_out_of_toner_rejected_outside_printer() {
        let result = transition_effect(
            EquipmentCategory::Dvr,
            EquipmentStatus::Active,
            EquipmentStatus::OutOfToner,
        );
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
    }

    #[test]
    fn test_returned_belongs_to_assignable_categories_only() {
        let result = transition_effect(
            EquipmentCategory::Server,
            EquipmentStatus::Active,
            EquipmentStatus::Returned,
        );
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));

        let effect = transition_effect(
            EquipmentCategory::Assigned,
            EquipmentStatus::Active,
            EquipmentStatus::Returned,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Release);
    }

    #[test]
    fn test_returned_to_active_reserves() {
        let effect = transition_effect(
            EquipmentCategory::Assigned,
            EquipmentStatus::Returned,
            EquipmentStatus::Active,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Reserve);
    }

    #[test]
    fn test_obsolete_from_returned_retires_available() {
        let effect = transition_effect(
            EquipmentCategory::Telephone,
            EquipmentStatus::Returned,
            EquipmentStatus::Obsolete,
        )
        .unwrap();
        assert_eq!(effect, LedgerEffect::Retire(StockBucket::Available));
    }

    #[test]
    fn test_deletion_effects() {
        assert_eq!(deletion_effect(EquipmentStatus::Active), LedgerEffect::Release);
        assert_eq!(deletion_effect(EquipmentStatus::OutOfToner), LedgerEffect::None);
        assert_eq!(deletion_effect(EquipmentStatus::Inactive), LedgerEffect::None);
        assert_eq!(deletion_effect(EquipmentStatus::Returned), LedgerEffect::None);
        assert_eq!(
            deletion_effect(EquipmentStatus::Decommissioned),
            LedgerEffect::None
        );
        assert_eq!(deletion_effect(EquipmentStatus::Obsolete), LedgerEffect::None);
    }
}
