use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::services::report_service::ReportService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/:template", get(render_report))
}

/// Entregar el PDF generado por el renderizador colaborador. Los bytes
/// se devuelven tal cual; el núcleo nunca los inspecciona.
async fn render_report(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = ReportService::new(state.pool.clone());
    let bytes = service.generate(state.renderer.as_ref(), &template).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.pdf\"", template),
            ),
        ],
        bytes,
    ))
}
