use axum::{extract::State, Json};
use tracing::warn;

use crate::db;
use crate::directory::queries::{fetch_stats, DirectoryStats};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/admin/reset
///
/// Dev-only: drops every table, recreates the schema and reseeds the demo
/// data. Returns the fresh directory counts.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<DirectoryStats>, AppError> {
    if !state.config.enable_admin_reset {
        return Err(AppError::Forbidden(
            "Admin reset is disabled (ENABLE_ADMIN_RESET=false)".to_string(),
        ));
    }

    warn!("Resetting the record store to demo data");
    db::reset(&state.db).await?;

    Ok(Json(fetch_stats(&state.db).await?))
}
