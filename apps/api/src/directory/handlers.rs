//! Axum route handlers for the directory listings.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::directory::queries::{self, DirectoryStats};
use crate::errors::AppError;
use crate::matching::profile::{fetch_role_requirements, RoleRequirement};
use crate::models::directory::{
    ApplicationRow, CompanyRow, CurriculumItemRow, EvidenceRow, RoleRow, SchoolRow,
    StudentRow, StudentSkillRow,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CurriculumResponse {
    pub school: SchoolRow,
    pub programs: BTreeMap<String, Vec<CurriculumItemRow>>,
}

#[derive(Debug, Serialize)]
pub struct RoleDetailResponse {
    pub role: RoleRow,
    pub requirements: Vec<RoleRequirement>,
}

#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    pub student: StudentRow,
    pub skills: Vec<StudentSkillRow>,
    pub evidence: Vec<EvidenceRow>,
    pub applications: Vec<ApplicationRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<DirectoryStats>, AppError> {
    Ok(Json(queries::fetch_stats(&state.db).await?))
}

/// GET /api/v1/schools
pub async fn handle_list_schools(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolRow>>, AppError> {
    Ok(Json(queries::list_schools(&state.db).await?))
}

/// GET /api/v1/schools/:id/curriculum
pub async fn handle_curriculum(
    State(state): State<AppState>,
    Path(school_id): Path<i64>,
) -> Result<Json<CurriculumResponse>, AppError> {
    let school = queries::find_school(&state.db, school_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("School {school_id} not found")))?;
    let programs = queries::fetch_curriculum(&state.db, school_id).await?;

    Ok(Json(CurriculumResponse { school, programs }))
}

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    Ok(Json(queries::list_companies(&state.db).await?))
}

/// GET /api/v1/roles
pub async fn handle_list_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleRow>>, AppError> {
    Ok(Json(queries::list_roles(&state.db).await?))
}

/// GET /api/v1/roles/:id
///
/// The role with its requirements in display order (mandatory first).
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<Json<RoleDetailResponse>, AppError> {
    let role = queries::find_role(&state.db, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;
    let requirements = fetch_role_requirements(&state.db, role_id).await?;

    Ok(Json(RoleDetailResponse { role, requirements }))
}

/// GET /api/v1/students
pub async fn handle_list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRow>>, AppError> {
    Ok(Json(queries::list_students(&state.db).await?))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<StudentDetailResponse>, AppError> {
    let student = queries::find_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    let skills = queries::fetch_student_skill_list(&state.db, student_id).await?;
    let evidence = queries::fetch_evidence(&state.db, student_id).await?;
    let applications = queries::fetch_applications(&state.db, student_id).await?;

    Ok(Json(StudentDetailResponse {
        student,
        skills,
        evidence,
        applications,
    }))
}
