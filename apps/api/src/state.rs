use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Pluggable match scorer. Default: CompetencyScorer with the standard weights.
    pub scorer: Arc<dyn MatchScorer>,
}
