//! Competency Profile Builder — turns raw skill/requirement rows into the
//! lookup structures the scorer consumes.
//!
//! Students become a `StudentProfile` keyed by competency id; roles become an
//! ordered `Vec<RoleRequirement>`. The requirement order is a public contract
//! (mandatory first, then category, then name) and is what gap lists inherit.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One of a student's skill records, joined with its competency.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRecord {
    pub competency_id: i64,
    pub level: i32,
    pub verified: bool,
    pub name: String,
    pub category: Option<String>,
}

/// A role's requirement on a competency, joined with that competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoleRequirement {
    pub competency_id: i64,
    pub min_level: i32,
    pub required: bool,
    pub name: String,
    pub category: Option<String>,
}

/// What a profile knows about one competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSkill {
    pub level: i32,
    pub verified: bool,
    pub name: String,
    pub category: Option<String>,
}

/// A student's skills keyed by competency id. Built per match, never stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentProfile {
    skills: HashMap<i64, ProfileSkill>,
}

impl StudentProfile {
    pub fn get(&self, competency_id: i64) -> Option<&ProfileSkill> {
        self.skills.get(&competency_id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Builds a profile from all skill records of a single student.
///
/// A repeated competency id overwrites the earlier record (last write wins).
pub fn build_student_profile<I>(records: I) -> StudentProfile
where
    I: IntoIterator<Item = SkillRecord>,
{
    let skills = records
        .into_iter()
        .map(|r| {
            (
                r.competency_id,
                ProfileSkill {
                    level: r.level,
                    verified: r.verified,
                    name: r.name,
                    category: r.category,
                },
            )
        })
        .collect();

    StudentProfile { skills }
}

/// Requirement order: `required` descending, `category` ascending, `name`
/// ascending. Strings compare byte-wise (case-sensitive); a missing category
/// sorts before any present one.
pub fn requirement_order(a: &RoleRequirement, b: &RoleRequirement) -> Ordering {
    b.required
        .cmp(&a.required)
        .then_with(|| a.category.cmp(&b.category))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts requirements into the public order. Stable, so fully equal keys keep
/// their relative input order.
pub fn sort_requirements(requirements: &mut [RoleRequirement]) {
    requirements.sort_by(requirement_order);
}

/// Loads a role's requirements in the public order.
pub async fn fetch_role_requirements(
    pool: &SqlitePool,
    role_id: i64,
) -> Result<Vec<RoleRequirement>, sqlx::Error> {
    let mut requirements = sqlx::query_as::<_, RoleRequirement>(
        r#"
        SELECT rr.competency_id, rr.min_level, rr.required, c.name, c.category
        FROM role_requirements rr
        JOIN competencies c ON c.id = rr.competency_id
        WHERE rr.role_id = ?
        "#,
    )
    .bind(role_id)
    .fetch_all(pool)
    .await?;

    sort_requirements(&mut requirements);
    Ok(requirements)
}

/// Loads every skill record of one student, joined with competency name/category.
pub async fn fetch_student_skills(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<SkillRecord>, sqlx::Error> {
    sqlx::query_as::<_, SkillRecord>(
        r#"
        SELECT ss.competency_id, ss.level, ss.verified, c.name, c.category
        FROM student_skills ss
        JOIN competencies c ON c.id = ss.competency_id
        WHERE ss.student_id = ?
        ORDER BY ss.id
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Convenience: fetch and build in one step.
pub async fn load_student_profile(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<StudentProfile, sqlx::Error> {
    Ok(build_student_profile(
        fetch_student_skills(pool, student_id).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_db;

    fn skill(id: i64, level: i32, verified: bool, name: &str) -> SkillRecord {
        SkillRecord {
            competency_id: id,
            level,
            verified,
            name: name.to_string(),
            category: Some("Web Development".to_string()),
        }
    }

    fn req(id: i64, required: bool, category: Option<&str>, name: &str) -> RoleRequirement {
        RoleRequirement {
            competency_id: id,
            min_level: 3,
            required,
            name: name.to_string(),
            category: category.map(str::to_string),
        }
    }

    fn names(reqs: &[RoleRequirement]) -> Vec<&str> {
        reqs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_profile_keyed_by_competency_id() {
        let profile = build_student_profile(vec![skill(1, 4, true, "HTML"), skill(2, 2, false, "CSS")]);

        assert_eq!(profile.len(), 2);
        let html = profile.get(1).unwrap();
        assert_eq!(html.level, 4);
        assert!(html.verified);
        assert_eq!(html.name, "HTML");
        assert_eq!(html.category.as_deref(), Some("Web Development"));
        assert!(profile.get(3).is_none());
    }

    #[test]
    fn test_duplicate_competency_last_write_wins() {
        let profile = build_student_profile(vec![skill(7, 5, true, "SQL"), skill(7, 1, false, "SQL")]);

        assert_eq!(profile.len(), 1);
        let sql = profile.get(7).unwrap();
        assert_eq!(sql.level, 1);
        assert!(!sql.verified);
    }

    #[test]
    fn test_empty_records_give_empty_profile() {
        let profile = build_student_profile(Vec::new());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_required_first_then_category_then_name() {
        let mut reqs = vec![
            req(1, false, Some("Tools"), "Git Basics"),
            req(2, true, Some("Web Development"), "HTML"),
            req(3, false, Some("Design"), "UI/UX Basics"),
            req(4, true, Some("Web Development"), "CSS"),
            req(5, true, Some("Data & Databases"), "SQL"),
            req(6, false, Some("Design"), "Figma"),
        ];
        sort_requirements(&mut reqs);

        assert_eq!(
            names(&reqs),
            vec!["SQL", "CSS", "HTML", "Figma", "UI/UX Basics", "Git Basics"]
        );
    }

    #[test]
    fn test_name_order_is_case_sensitive() {
        let mut reqs = vec![
            req(1, true, Some("Tools"), "git"),
            req(2, true, Some("Tools"), "Zsh"),
            req(3, true, Some("Tools"), "Bash"),
        ];
        sort_requirements(&mut reqs);
        // Uppercase letters sort before lowercase ones.
        assert_eq!(names(&reqs), vec!["Bash", "Zsh", "git"]);
    }

    #[test]
    fn test_missing_category_sorts_first_within_group() {
        let mut reqs = vec![
            req(1, true, Some("Alpha"), "B"),
            req(2, true, None, "Z"),
            req(3, false, None, "A"),
        ];
        sort_requirements(&mut reqs);
        assert_eq!(names(&reqs), vec!["Z", "B", "A"]);
    }

    #[test]
    fn test_sort_is_independent_of_input_order() {
        let base = vec![
            req(1, false, Some("Soft Skills"), "Communication"),
            req(2, true, Some("Web Development"), "JavaScript"),
            req(3, true, Some("Web Development"), "CSS"),
        ];
        let mut forward = base.clone();
        let mut reversed: Vec<_> = base.into_iter().rev().collect();
        sort_requirements(&mut forward);
        sort_requirements(&mut reversed);
        assert_eq!(forward, reversed);
    }

    #[tokio::test]
    async fn test_fetch_role_requirements_ordered() {
        let db = seeded_db().await;
        let role_id: i64 =
            sqlx::query_scalar("SELECT id FROM roles WHERE title = 'Web Intern (Frontend)'")
                .fetch_one(&db.pool)
                .await
                .unwrap();

        let reqs = fetch_role_requirements(&db.pool, role_id).await.unwrap();

        assert_eq!(
            names(&reqs),
            vec![
                "CSS",
                "HTML",
                "JavaScript",
                "UI/UX Basics",
                "Communication",
                "Git Basics"
            ]
        );
        assert!(reqs[..3].iter().all(|r| r.required));
        assert!(reqs[3..].iter().all(|r| !r.required));
    }

    #[tokio::test]
    async fn test_load_student_profile_from_store() {
        let db = seeded_db().await;
        let student_id: i64 =
            sqlx::query_scalar("SELECT id FROM students WHERE name = 'Bagus Santoso'")
                .fetch_one(&db.pool)
                .await
                .unwrap();

        let profile = load_student_profile(&db.pool, student_id).await.unwrap();

        assert_eq!(profile.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_role_has_no_requirements() {
        let db = seeded_db().await;
        let reqs = fetch_role_requirements(&db.pool, 9_999).await.unwrap();
        assert!(reqs.is_empty());
    }
}
