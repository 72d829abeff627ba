pub mod admin;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::directory::handlers as directory;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Directory API
        .route("/api/v1/stats", get(directory::handle_stats))
        .route("/api/v1/schools", get(directory::handle_list_schools))
        .route(
            "/api/v1/schools/:id/curriculum",
            get(directory::handle_curriculum),
        )
        .route("/api/v1/companies", get(directory::handle_list_companies))
        .route("/api/v1/roles", get(directory::handle_list_roles))
        .route("/api/v1/roles/:id", get(directory::handle_get_role))
        .route("/api/v1/students", get(directory::handle_list_students))
        .route("/api/v1/students/:id", get(directory::handle_get_student))
        // Match API
        .route("/api/v1/match/role/:id", get(matching::handle_match_role))
        .route(
            "/api/v1/match/student/:id",
            get(matching::handle_match_student),
        )
        .route(
            "/api/v1/match/student/:student_id/role/:role_id",
            get(matching::handle_match_pair),
        )
        // Dev utilities
        .route("/api/v1/admin/reset", post(admin::handle_reset))
        .with_state(state)
}
