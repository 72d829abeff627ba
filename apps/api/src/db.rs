use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::seed::seed_if_empty;

/// Schema statements, executed one at a time in order. Every statement is
/// idempotent so startup can run them against an existing database.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schools (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        city TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        name   TEXT NOT NULL,
        sector TEXT,
        city   TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS competencies (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        category TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS curriculum_items (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        school_id     INTEGER NOT NULL REFERENCES schools(id) ON DELETE CASCADE,
        program       TEXT NOT NULL,
        competency_id INTEGER NOT NULL REFERENCES competencies(id) ON DELETE CASCADE,
        target_level  INTEGER NOT NULL CHECK (target_level BETWEEN 1 AND 5)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id  INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
        title       TEXT NOT NULL,
        description TEXT,
        city        TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS role_requirements (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        role_id       INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        competency_id INTEGER NOT NULL REFERENCES competencies(id) ON DELETE CASCADE,
        min_level     INTEGER NOT NULL CHECK (min_level BETWEEN 1 AND 5),
        required      BOOLEAN NOT NULL CHECK (required IN (0, 1)),
        UNIQUE (role_id, competency_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        school_id    INTEGER NOT NULL REFERENCES schools(id) ON DELETE CASCADE,
        program      TEXT NOT NULL,
        city         TEXT,
        availability TEXT,
        about        TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS student_skills (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id    INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
        competency_id INTEGER NOT NULL REFERENCES competencies(id) ON DELETE CASCADE,
        level         INTEGER NOT NULL CHECK (level BETWEEN 1 AND 5),
        verified      BOOLEAN NOT NULL CHECK (verified IN (0, 1)),
        UNIQUE (student_id, competency_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS evidence (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
        title      TEXT NOT NULL,
        url        TEXT,
        kind       TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS applications (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
        role_id    INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        status     TEXT NOT NULL DEFAULT 'applied',
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (student_id, role_id)
    )
    "#,
];

/// Tables in reverse dependency order, for dropping.
const TABLES_CHILD_FIRST: &[&str] = &[
    "applications",
    "evidence",
    "student_skills",
    "students",
    "role_requirements",
    "roles",
    "curriculum_items",
    "competencies",
    "companies",
    "schools",
];

/// Creates and returns a SQLite connection pool. The database file is created
/// if it does not exist yet.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates any missing tables.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply schema statement")?;
    }
    Ok(())
}

/// Dev utility: drops every table, recreates the schema and reseeds demo data.
pub async fn reset(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for table in TABLES_CHILD_FIRST {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    info!("Dropped {} tables", TABLES_CHILD_FIRST.len());

    init_schema(pool).await?;
    seed_if_empty(pool).await?;
    Ok(())
}
