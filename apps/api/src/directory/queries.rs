//! Read-only queries over the record store. Listing order is part of the
//! contract: ranking ties fall back to these orders.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::directory::{
    ApplicationRow, CompanyRow, CurriculumItemRow, EvidenceRow, RoleRow, SchoolRow,
    StudentRow, StudentSkillRow,
};

const ROLE_SELECT: &str = "SELECT r.id, r.company_id, r.title, r.description, r.city, \
    c.name AS company_name, c.sector, c.city AS company_city \
    FROM roles r JOIN companies c ON c.id = r.company_id";

const STUDENT_SELECT: &str = "SELECT s.id, s.name, s.school_id, s.program, s.city, \
    s.availability, s.about, sc.name AS school_name, sc.city AS school_city \
    FROM students s JOIN schools sc ON sc.id = s.school_id";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectoryStats {
    pub schools: i64,
    pub companies: i64,
    pub students: i64,
    pub roles: i64,
    pub competencies: i64,
}

pub async fn fetch_stats(pool: &SqlitePool) -> Result<DirectoryStats, sqlx::Error> {
    Ok(DirectoryStats {
        schools: count(pool, "schools").await?,
        companies: count(pool, "companies").await?,
        students: count(pool, "students").await?,
        roles: count(pool, "roles").await?,
        competencies: count(pool, "competencies").await?,
    })
}

async fn count(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
}

pub async fn list_schools(pool: &SqlitePool) -> Result<Vec<SchoolRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, city FROM schools ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_school(pool: &SqlitePool, id: i64) -> Result<Option<SchoolRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, city FROM schools WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Curriculum items of one school grouped by program. Programs iterate in
/// ascending order; items within a program by category, then name.
pub async fn fetch_curriculum(
    pool: &SqlitePool,
    school_id: i64,
) -> Result<BTreeMap<String, Vec<CurriculumItemRow>>, sqlx::Error> {
    let items: Vec<CurriculumItemRow> = sqlx::query_as(
        r#"
        SELECT ci.program, c.name AS competency_name, c.category, ci.target_level
        FROM curriculum_items ci
        JOIN competencies c ON c.id = ci.competency_id
        WHERE ci.school_id = ?
        ORDER BY ci.program ASC, c.category ASC, c.name ASC
        "#,
    )
    .bind(school_id)
    .fetch_all(pool)
    .await?;

    Ok(group_by_program(items))
}

fn group_by_program(items: Vec<CurriculumItemRow>) -> BTreeMap<String, Vec<CurriculumItemRow>> {
    let mut grouped: BTreeMap<String, Vec<CurriculumItemRow>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.program.clone()).or_default().push(item);
    }
    grouped
}

pub async fn list_companies(pool: &SqlitePool) -> Result<Vec<CompanyRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, sector, city FROM companies ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

/// All roles, title ascending.
pub async fn list_roles(pool: &SqlitePool) -> Result<Vec<RoleRow>, sqlx::Error> {
    sqlx::query_as(&format!("{ROLE_SELECT} ORDER BY r.title ASC"))
        .fetch_all(pool)
        .await
}

pub async fn find_role(pool: &SqlitePool, id: i64) -> Result<Option<RoleRow>, sqlx::Error> {
    sqlx::query_as(&format!("{ROLE_SELECT} WHERE r.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All students, name ascending.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<StudentRow>, sqlx::Error> {
    sqlx::query_as(&format!("{STUDENT_SELECT} ORDER BY s.name ASC"))
        .fetch_all(pool)
        .await
}

pub async fn find_student(pool: &SqlitePool, id: i64) -> Result<Option<StudentRow>, sqlx::Error> {
    sqlx::query_as(&format!("{STUDENT_SELECT} WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_student_skill_list(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<StudentSkillRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT c.name AS competency_name, c.category, ss.level, ss.verified
        FROM student_skills ss
        JOIN competencies c ON c.id = ss.competency_id
        WHERE ss.student_id = ?
        ORDER BY c.category ASC, c.name ASC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Evidence of one student, newest first.
pub async fn fetch_evidence(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<EvidenceRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, student_id, title, url, kind FROM evidence WHERE student_id = ? ORDER BY id DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_applications(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.role_id, r.title AS role_title, a.status, a.created_at
        FROM applications a
        JOIN roles r ON r.id = a.role_id
        WHERE a.student_id = ?
        ORDER BY a.created_at DESC, a.id DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}
