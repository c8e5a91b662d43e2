//! Test Reset Endpoint
//!
//! Wipes both collections so end-to-end suites can start clean. Only
//! mounted outside production.

use std::sync::Arc;

use auth::PgUserRepository;
use auth::domain::repository::UserRepository;
use axum::Json;
use axum::extract::State;
use kernel::error::app_error::AppResult;
use publications::PgPublicationRepository;
use publications::domain::repository::PublicationRepository;
use serde_json::{Value, json};

/// Repositories the reset needs
#[derive(Clone)]
pub struct ResetState {
    pub users: Arc<PgUserRepository>,
    pub publications: Arc<PgPublicationRepository>,
}

/// POST /test/reset
pub async fn reset(State(state): State<ResetState>) -> AppResult<Json<Value>> {
    // Publications first: they hold the foreign key to users
    let publicaciones = state
        .publications
        .delete_all()
        .await
        .map_err(|e| e.to_app_error())?;
    let usuarios = state.users.delete_all().await.map_err(|e| e.to_app_error())?;

    tracing::warn!(usuarios, publicaciones, "test reset wiped all data");

    Ok(Json(json!({
        "mensaje": "Datos eliminados",
        "usuarios": usuarios,
        "publicaciones": publicaciones,
    })))
}
