use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub sector: Option<String>,
    pub city: Option<String>,
}

/// A role joined with its owning company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub company_name: String,
    pub sector: Option<String>,
    pub company_city: Option<String>,
}

/// A student joined with their school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
    pub program: String,
    pub city: Option<String>,
    pub availability: Option<String>,
    pub about: Option<String>,
    pub school_name: String,
    pub school_city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CurriculumItemRow {
    pub program: String,
    pub competency_name: String,
    pub category: Option<String>,
    pub target_level: i32,
}

/// A student's skill as listed on their profile page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentSkillRow {
    pub competency_name: String,
    pub category: Option<String>,
    pub level: i32,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvidenceRow {
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub url: Option<String>,
    pub kind: Option<String>,
}

/// An application joined with the role title it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub role_id: i64,
    pub role_title: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}
