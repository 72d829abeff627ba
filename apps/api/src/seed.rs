//! Demo data set: two vocational schools, three host companies, a shared
//! competency vocabulary, four internship roles and four students.
//!
//! Seeding happens in one transaction and only when the store is empty.

use std::collections::HashMap;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

const SCHOOLS: &[(&str, &str)] = &[
    ("SMK Negeri 1 Jakarta", "Jakarta"),
    ("SMK Telkom Bandung", "Bandung"),
];

const COMPANIES: &[(&str, &str, &str)] = &[
    ("PT Nusantara Tech", "Software / IT Services", "Jakarta"),
    ("Bali Manufacturing", "Manufacturing", "Denpasar"),
    ("Surabaya Automation Labs", "Industrial Automation", "Surabaya"),
];

const COMPETENCIES: &[(&str, &str)] = &[
    ("HTML", "Web Development"),
    ("CSS", "Web Development"),
    ("JavaScript", "Web Development"),
    ("SQL", "Data & Databases"),
    ("Git Basics", "Tools"),
    ("UI/UX Basics", "Design"),
    ("Communication", "Soft Skills"),
    ("Teamwork", "Soft Skills"),
    ("PLC Basics", "Industrial Automation"),
    ("Sensor & Actuator Basics", "Industrial Automation"),
    ("CNC Basics", "Manufacturing"),
    ("Safety (K3)", "Manufacturing"),
];

/// (school, program, competency, target level)
const CURRICULUM: &[(&str, &str, &str, i32)] = &[
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "HTML", 4),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "CSS", 4),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "JavaScript", 3),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "SQL", 3),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "Git Basics", 3),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "Communication", 3),
    ("SMK Negeri 1 Jakarta", "RPL (Software Engineering)", "Teamwork", 3),
    ("SMK Telkom Bandung", "TKJ (Computer & Network)", "SQL", 2),
    ("SMK Telkom Bandung", "TKJ (Computer & Network)", "Git Basics", 2),
    ("SMK Telkom Bandung", "TKJ (Computer & Network)", "Communication", 3),
    ("SMK Telkom Bandung", "TKJ (Computer & Network)", "Teamwork", 3),
    ("SMK Telkom Bandung", "Mechatronics", "PLC Basics", 3),
    ("SMK Telkom Bandung", "Mechatronics", "Sensor & Actuator Basics", 3),
    ("SMK Telkom Bandung", "Mechatronics", "Safety (K3)", 4),
];

/// (company, title, description, city)
const ROLES: &[(&str, &str, &str, &str)] = &[
    (
        "PT Nusantara Tech",
        "Web Intern (Frontend)",
        "Build and improve simple web pages. Work with UI components and basic APIs.",
        "Jakarta",
    ),
    (
        "PT Nusantara Tech",
        "Junior Data Assistant",
        "Help clean data, write simple SQL queries, and create basic reports.",
        "Jakarta",
    ),
    (
        "Bali Manufacturing",
        "CNC Operator Trainee",
        "Assist in CNC setup, basic operation, and safety procedures.",
        "Denpasar",
    ),
    (
        "Surabaya Automation Labs",
        "PLC Technician Intern",
        "Support PLC wiring, sensor checks, and basic troubleshooting with a mentor.",
        "Surabaya",
    ),
];

/// (role, competency, min level, required)
const REQUIREMENTS: &[(&str, &str, i32, bool)] = &[
    ("Web Intern (Frontend)", "HTML", 3, true),
    ("Web Intern (Frontend)", "CSS", 3, true),
    ("Web Intern (Frontend)", "JavaScript", 2, true),
    ("Web Intern (Frontend)", "Git Basics", 2, false),
    ("Web Intern (Frontend)", "UI/UX Basics", 2, false),
    ("Web Intern (Frontend)", "Communication", 3, false),
    ("Junior Data Assistant", "SQL", 3, true),
    ("Junior Data Assistant", "Communication", 3, true),
    ("Junior Data Assistant", "Teamwork", 3, false),
    ("CNC Operator Trainee", "CNC Basics", 2, true),
    ("CNC Operator Trainee", "Safety (K3)", 3, true),
    ("CNC Operator Trainee", "Teamwork", 3, false),
    ("PLC Technician Intern", "PLC Basics", 3, true),
    ("PLC Technician Intern", "Sensor & Actuator Basics", 2, true),
    ("PLC Technician Intern", "Safety (K3)", 3, true),
    ("PLC Technician Intern", "Communication", 3, false),
];

/// (name, school, program, city, availability, about)
const STUDENTS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Ayu Pratama",
        "SMK Negeri 1 Jakarta",
        "RPL (Software Engineering)",
        "Jakarta",
        "Jun–Aug",
        "Frontend-focused, likes UI work and teamwork.",
    ),
    (
        "Bagus Santoso",
        "SMK Negeri 1 Jakarta",
        "RPL (Software Engineering)",
        "Bekasi",
        "Jul–Sep",
        "Interested in databases and reporting, careful and detail-oriented.",
    ),
    (
        "Citra Maharani",
        "SMK Telkom Bandung",
        "Mechatronics",
        "Surabaya",
        "Jun–Aug",
        "Hands-on learner, interested in automation and maintenance.",
    ),
    (
        "Dewa Putra",
        "SMK Telkom Bandung",
        "Mechatronics",
        "Denpasar",
        "Jun–Aug",
        "Interested in manufacturing and safety-first work environments.",
    ),
];

/// (student, competency, level, verified)
const SKILLS: &[(&str, &str, i32, bool)] = &[
    ("Ayu Pratama", "HTML", 4, true),
    ("Ayu Pratama", "CSS", 4, true),
    ("Ayu Pratama", "JavaScript", 3, false),
    ("Ayu Pratama", "Git Basics", 3, true),
    ("Ayu Pratama", "UI/UX Basics", 3, false),
    ("Ayu Pratama", "Communication", 4, true),
    ("Ayu Pratama", "Teamwork", 4, true),
    ("Bagus Santoso", "SQL", 4, true),
    ("Bagus Santoso", "JavaScript", 2, false),
    ("Bagus Santoso", "Git Basics", 2, true),
    ("Bagus Santoso", "Communication", 3, true),
    ("Bagus Santoso", "Teamwork", 3, true),
    ("Citra Maharani", "PLC Basics", 4, true),
    ("Citra Maharani", "Sensor & Actuator Basics", 3, true),
    ("Citra Maharani", "Safety (K3)", 4, true),
    ("Citra Maharani", "Communication", 3, true),
    ("Citra Maharani", "Teamwork", 4, true),
    ("Dewa Putra", "CNC Basics", 3, true),
    ("Dewa Putra", "Safety (K3)", 4, true),
    ("Dewa Putra", "Teamwork", 4, true),
    ("Dewa Putra", "Communication", 3, true),
];

/// (student, title, url, kind)
const EVIDENCE: &[(&str, &str, &str, &str)] = &[
    (
        "Ayu Pratama",
        "Portfolio: Simple Landing Page",
        "https://example.com/ayu-landing",
        "Portfolio",
    ),
    (
        "Ayu Pratama",
        "Certificate: Basic Git",
        "https://example.com/ayu-git",
        "Certificate",
    ),
    (
        "Bagus Santoso",
        "Mini Project: Sales Report (SQL)",
        "https://example.com/bagus-sql",
        "Project",
    ),
    (
        "Citra Maharani",
        "Workshop: PLC Ladder Basics",
        "https://example.com/citra-plc",
        "Workshop",
    ),
    (
        "Dewa Putra",
        "Safety Training (K3) Badge",
        "https://example.com/dewa-k3",
        "Certificate",
    ),
];

/// (student, role, status)
const APPLICATIONS: &[(&str, &str, &str)] = &[
    ("Ayu Pratama", "Web Intern (Frontend)", "applied"),
    ("Citra Maharani", "PLC Technician Intern", "shortlisted"),
];

/// Inserts the demo data set unless the store already holds schools.
/// Returns `true` when rows were inserted.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<bool> {
    let schools: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
        .fetch_one(pool)
        .await?;
    if schools > 0 {
        info!("Store already seeded ({schools} schools), skipping demo data");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut school_ids = HashMap::new();
    for (name, city) in SCHOOLS {
        let id = sqlx::query("INSERT INTO schools (name, city) VALUES (?, ?)")
            .bind(*name)
            .bind(*city)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        school_ids.insert(*name, id);
    }

    let mut company_ids = HashMap::new();
    for (name, sector, city) in COMPANIES {
        let id = sqlx::query("INSERT INTO companies (name, sector, city) VALUES (?, ?, ?)")
            .bind(*name)
            .bind(*sector)
            .bind(*city)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        company_ids.insert(*name, id);
    }

    let mut competency_ids = HashMap::new();
    for (name, category) in COMPETENCIES {
        let id = sqlx::query("INSERT INTO competencies (name, category) VALUES (?, ?)")
            .bind(*name)
            .bind(*category)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        competency_ids.insert(*name, id);
    }

    for (school, program, competency, target_level) in CURRICULUM {
        sqlx::query(
            "INSERT INTO curriculum_items (school_id, program, competency_id, target_level)
             VALUES (?, ?, ?, ?)",
        )
        .bind(lookup(&school_ids, school)?)
        .bind(*program)
        .bind(lookup(&competency_ids, competency)?)
        .bind(*target_level)
        .execute(&mut *tx)
        .await?;
    }

    let mut role_ids = HashMap::new();
    for (company, title, description, city) in ROLES {
        let id = sqlx::query(
            "INSERT INTO roles (company_id, title, description, city) VALUES (?, ?, ?, ?)",
        )
        .bind(lookup(&company_ids, company)?)
        .bind(*title)
        .bind(*description)
        .bind(*city)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        role_ids.insert(*title, id);
    }

    for (role, competency, min_level, required) in REQUIREMENTS {
        sqlx::query(
            "INSERT INTO role_requirements (role_id, competency_id, min_level, required)
             VALUES (?, ?, ?, ?)",
        )
        .bind(lookup(&role_ids, role)?)
        .bind(lookup(&competency_ids, competency)?)
        .bind(*min_level)
        .bind(*required)
        .execute(&mut *tx)
        .await?;
    }

    let mut student_ids = HashMap::new();
    for (name, school, program, city, availability, about) in STUDENTS {
        let id = sqlx::query(
            "INSERT INTO students (name, school_id, program, city, availability, about)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(*name)
        .bind(lookup(&school_ids, school)?)
        .bind(*program)
        .bind(*city)
        .bind(*availability)
        .bind(*about)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        student_ids.insert(*name, id);
    }

    for (student, competency, level, verified) in SKILLS {
        sqlx::query(
            "INSERT INTO student_skills (student_id, competency_id, level, verified)
             VALUES (?, ?, ?, ?)",
        )
        .bind(lookup(&student_ids, student)?)
        .bind(lookup(&competency_ids, competency)?)
        .bind(*level)
        .bind(*verified)
        .execute(&mut *tx)
        .await?;
    }

    for (student, title, url, kind) in EVIDENCE {
        sqlx::query("INSERT INTO evidence (student_id, title, url, kind) VALUES (?, ?, ?, ?)")
            .bind(lookup(&student_ids, student)?)
            .bind(*title)
            .bind(*url)
            .bind(*kind)
            .execute(&mut *tx)
            .await?;
    }

    for (student, role, status) in APPLICATIONS {
        sqlx::query("INSERT INTO applications (student_id, role_id, status) VALUES (?, ?, ?)")
            .bind(lookup(&student_ids, student)?)
            .bind(lookup(&role_ids, role)?)
            .bind(*status)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit()
        .await
        .context("Failed to commit seed transaction")?;

    info!(
        "Seeded demo data: {} schools, {} companies, {} roles, {} students",
        SCHOOLS.len(),
        COMPANIES.len(),
        ROLES.len(),
        STUDENTS.len()
    );
    Ok(true)
}

fn lookup(ids: &HashMap<&str, i64>, name: &str) -> Result<i64> {
    ids.get(name)
        .copied()
        .with_context(|| format!("Seed data references unknown name '{name}'"))
}
