//! Static Upload Retrieval
//!
//! Serves previously stored images back. The type segment must name a
//! known collection and the file name is resolved through the store,
//! which refuses anything that is not a plain file name.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, AppResult};
use platform::upload::{ImageStore, UploadKind, content_type_for};

/// GET /uploads/{tipo}/{archivo}
pub async fn serve_upload(
    State(images): State<Arc<ImageStore>>,
    Path((tipo, archivo)): Path<(String, String)>,
) -> AppResult<Response> {
    let kind = UploadKind::from_segment(&tipo)
        .ok_or_else(|| AppError::bad_request("Tipo de recurso inválido"))?;

    let path = images
        .resolve(kind, &archivo)
        .ok_or_else(|| AppError::bad_request("Nombre de archivo inválido"))?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::not_found("Archivo no encontrado"))?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&archivo))], bytes).into_response())
}
