//! Middleware de CORS
//!
//! El panel de administración se sirve desde otro origen en desarrollo;
//! en producción la lista de orígenes viene de la configuración.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS para desarrollo: cualquier origen
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS restringido a los orígenes configurados
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let mut cors = CorsLayer::new();

    for origin in origins {
        if let Ok(header_value) = HeaderValue::from_str(origin) {
            cors = cors.allow_origin(header_value);
        }
    }

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        HeaderName::from_static("content-type"),
        HeaderName::from_static("accept"),
        HeaderName::from_static("x-user-id"),
        HeaderName::from_static("x-user-name"),
        HeaderName::from_static("x-user-role"),
    ])
    .allow_credentials(true)
    .max_age(std::time::Duration::from_secs(3600))
}
