use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a development default, so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Seed the demo schools/companies/students when the store is empty.
    pub seed_demo_data: bool,
    /// Dev-only: allow `POST /api/v1/admin/reset` to wipe and reseed the store.
    pub enable_admin_reset: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://data.db"),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", "5")
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            seed_demo_data: parse_flag("SEED_DEMO_DATA", &env_or("SEED_DEMO_DATA", "true"))?,
            enable_admin_reset: parse_flag(
                "ENABLE_ADMIN_RESET",
                &env_or("ENABLE_ADMIN_RESET", "true"),
            )?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean flag, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " ON ").unwrap());
        assert!(parse_flag("X", "1").unwrap());
        assert!(!parse_flag("X", "false").unwrap());
        assert!(!parse_flag("X", "No").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        let err = parse_flag("SEED_DEMO_DATA", "maybe").unwrap_err();
        assert!(err.to_string().contains("SEED_DEMO_DATA"));
    }
}
