//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de equipos de red: direcciones IP, MAC, números de serie y cantidades.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    static ref IPV4_RE: Regex = Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
    )
    .unwrap();
    static ref MAC_RE: Regex =
        Regex::new(r"^([0-9A-Fa-f]{2}[:\-]){5}[0-9A-Fa-f]{2}$").unwrap();
    static ref SERIAL_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-_/\.]{2,63}$").unwrap();
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de dirección IPv4
pub fn validate_ip(value: &str) -> Result<(), ValidationError> {
    if !IPV4_RE.is_match(value) {
        let mut error = ValidationError::new("ip");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"IPv4 dotted quad".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de dirección MAC (XX:XX:XX:XX:XX:XX o con guiones)
pub fn validate_mac(value: &str) -> Result<(), ValidationError> {
    if !MAC_RE.is_match(value) {
        let mut error = ValidationError::new("mac");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XX:XX:XX:XX:XX:XX".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de número de serie
pub fn validate_serial(value: &str) -> Result<(), ValidationError> {
    if !SERIAL_RE.is_match(value) {
        let mut error = ValidationError::new("serial");
        error.add_param("value".into(), &value.to_string());
        error.add_param("length".into(), &"3-64 caracteres alfanuméricos".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que una cantidad sea positiva
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<
    T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize,
>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_ip() {
        assert!(validate_ip("192.168.1.10").is_ok());
        assert!(validate_ip("10.0.0.254").is_ok());
        assert!(validate_ip("256.1.1.1").is_err());
        assert!(validate_ip("192.168.1").is_err());
        assert!(validate_ip("not-an-ip").is_err());
    }

    #[test]
    fn test_validate_mac() {
        assert!(validate_mac("AA:BB:CC:DD:EE:FF").is_ok());
        assert!(validate_mac("aa-bb-cc-dd-ee-ff").is_ok());
        assert!(validate_mac("AA:BB:CC:DD:EE").is_err());
        assert!(validate_mac("GG:BB:CC:DD:EE:FF").is_err());
    }

    #[test]
    fn test_validate_serial() {
        assert!(validate_serial("SN-2024/0042").is_ok());
        assert!(validate_serial("ABC123").is_ok());
        assert!(validate_serial("ab").is_err());
        assert!(validate_serial("-starts-with-dash").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }
}
