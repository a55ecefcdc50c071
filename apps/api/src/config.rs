use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required variables abort startup with a descriptive error.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Bearer token gating all admin endpoints. An empty value closes the
    /// admin API entirely (every privileged call answers 401).
    pub admin_token: String,
    pub public_dir: String,
    pub upload_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            admin_token: require_env("ADMIN_TOKEN")?,
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
