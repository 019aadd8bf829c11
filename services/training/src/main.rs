use std::sync::Arc;

use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use dti_auth_types::token::JwtSecret;
use dti_core::clock::SystemClock;
use dti_core::config::Config;
use dti_core::tracing::init_tracing;
use dti_training::config::TrainingConfig;
use dti_training::router::build_router;
use dti_training::state::{AppState, TokenTtl};
use dti_training_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = TrainingConfig::from_env().context("load training config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("apply migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        token_ttl: TokenTtl {
            access_secs: config.access_token_ttl_secs,
            refresh_secs: config.refresh_token_ttl_secs,
        },
        clock: Arc::new(SystemClock),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.training_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("training service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
