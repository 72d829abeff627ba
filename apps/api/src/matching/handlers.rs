//! Axum route handlers for the Match API.
//!
//! Each handler fetches everything it needs up front, then runs the scorer
//! synchronously over already-loaded values.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::directory::queries::{find_role, find_student, list_roles, list_students};
use crate::errors::AppError;
use crate::matching::profile::{fetch_role_requirements, load_student_profile, RoleRequirement};
use crate::matching::ranking::{rank_by_score, RankedMatch};
use crate::matching::scorer::MatchResult;
use crate::models::directory::{RoleRow, StudentRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchRoleResponse {
    pub role: RoleRow,
    pub requirements: Vec<RoleRequirement>,
    pub ranked: Vec<RankedMatch<StudentRow>>,
}

#[derive(Debug, Serialize)]
pub struct MatchStudentResponse {
    pub student: StudentRow,
    pub ranked: Vec<RankedMatch<RoleRow>>,
}

#[derive(Debug, Serialize)]
pub struct MatchPairResponse {
    pub student: StudentRow,
    pub role: RoleRow,
    pub requirements: Vec<RoleRequirement>,
    pub result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/match/role/:id
///
/// Ranks every student against one role, best fit first. Students with equal
/// scores stay in name order.
pub async fn handle_match_role(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<Json<MatchRoleResponse>, AppError> {
    let role = find_role(&state.db, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;
    let requirements = fetch_role_requirements(&state.db, role_id).await?;

    let mut evaluated = Vec::new();
    for student in list_students(&state.db).await? {
        let profile = load_student_profile(&state.db, student.id).await?;
        let result = state.scorer.score(
            student.city.as_deref(),
            role.city.as_deref(),
            &profile,
            &requirements,
        );
        debug!(
            "Student {} vs role {}: score={} gaps={}",
            student.id,
            role.id,
            result.score,
            result.gaps.len()
        );
        evaluated.push((student, result));
    }

    let ranked = rank_by_score(evaluated);
    info!("Ranked {} students for role {}", ranked.len(), role.id);

    Ok(Json(MatchRoleResponse {
        role,
        requirements,
        ranked,
    }))
}

/// GET /api/v1/match/student/:id
///
/// Ranks every role for one student, best fit first. Roles with equal scores
/// stay in title order.
pub async fn handle_match_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<MatchStudentResponse>, AppError> {
    let student = find_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;
    let profile = load_student_profile(&state.db, student_id).await?;
    if profile.is_empty() {
        debug!("Student {student_id} has no recorded skills");
    } else {
        debug!("Student {student_id} profile: {} competencies", profile.len());
    }

    let mut evaluated = Vec::new();
    for role in list_roles(&state.db).await? {
        let requirements = fetch_role_requirements(&state.db, role.id).await?;
        let result = state.scorer.score(
            student.city.as_deref(),
            role.city.as_deref(),
            &profile,
            &requirements,
        );
        evaluated.push((role, result));
    }

    let ranked = rank_by_score(evaluated);
    info!("Ranked {} roles for student {}", ranked.len(), student.id);

    Ok(Json(MatchStudentResponse { student, ranked }))
}

/// GET /api/v1/match/student/:student_id/role/:role_id
///
/// Explains a single pairing.
pub async fn handle_match_pair(
    State(state): State<AppState>,
    Path((student_id, role_id)): Path<(i64, i64)>,
) -> Result<Json<MatchPairResponse>, AppError> {
    let student = find_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;
    let role = find_role(&state.db, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;

    let profile = load_student_profile(&state.db, student_id).await?;
    let requirements = fetch_role_requirements(&state.db, role_id).await?;
    let result = state.scorer.score(
        student.city.as_deref(),
        role.city.as_deref(),
        &profile,
        &requirements,
    );
    for gap in &result.gaps {
        debug!("Student {student_id} / role {role_id}: {gap}");
    }

    Ok(Json(MatchPairResponse {
        student,
        role,
        requirements,
        result,
    }))
}
