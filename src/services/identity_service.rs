//! Proveedor de identidad de sesión
//!
//! La emisión de cookies de sesión vive fuera de este servicio; el núcleo
//! solo necesita saber quién ejecuta la operación para sellar
//! `assigned_by` en equipos asignables y teléfonos. El proveedor se
//! inyecta como trait object en el estado compartido.

use axum::http::HeaderMap;

/// Identidad del usuario que ejecuta la petición
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl UserIdentity {
    /// Identidad de respaldo cuando la capa de sesión no aporta usuario
    pub fn system() -> Self {
        Self {
            id: "system".to_string(),
            name: "sistema".to_string(),
            role: "admin".to_string(),
        }
    }
}

pub trait IdentityProvider: Send + Sync {
    fn current_user(&self, headers: &HeaderMap) -> UserIdentity;
}

/// Proveedor por defecto: lee la identidad resuelta por el middleware de
/// sesión desde headers internos. Si no vienen, opera como "sistema".
pub struct HeaderIdentityProvider;

impl IdentityProvider for HeaderIdentityProvider {
    fn current_user(&self, headers: &HeaderMap) -> UserIdentity {
        let header_value = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };

        match (header_value("x-user-id"), header_value("x-user-name")) {
            (Some(id), Some(name)) => UserIdentity {
                id,
                name,
                role: header_value("x-user-role").unwrap_or_else(|| "operator".to_string()),
            },
            _ => UserIdentity::system(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_identity_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("u-7"));
        headers.insert("x-user-name", HeaderValue::from_static("ana"));

        let identity = HeaderIdentityProvider.current_user(&headers);
        assert_eq!(identity.id, "u-7");
        assert_eq!(identity.name, "ana");
        assert_eq!(identity.role, "operator");
    }

    #[test]
    fn test_missing_headers_fall_back_to_system() {
        let identity = HeaderIdentityProvider.current_user(&HeaderMap::new());
        assert_eq!(identity.id, "system");
    }
}
