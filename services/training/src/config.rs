use serde::Deserialize;

use dti_core::config::Config;

/// Training service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct TrainingConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for access and refresh tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3114). Env var: `TRAINING_PORT`.
    #[serde(default = "default_port")]
    pub training_port: u16,
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,
    /// Apply pending migrations before serving (default true).
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Config for TrainingConfig {}

fn default_port() -> u16 {
    3114
}

fn default_access_ttl() -> u64 {
    5 * 60
}

fn default_refresh_ttl() -> u64 {
    24 * 60 * 60
}

fn default_run_migrations() -> bool {
    true
}
