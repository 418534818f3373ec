use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    users::{PgUserStore, UserStore},
};

/// Opens the shared pool and checks it is alive.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    if config.database_url.trim().is_empty() {
        anyhow::bail!("DATABASE_URL environment variable is not set");
    }

    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("open database connection")?;

    sqlx::query("SELECT 1")
        .execute(&db)
        .await
        .context("ping database")?;

    info!("Successfully connected to the database!");
    Ok(db)
}

pub async fn migrate(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        warn!(error = %e, "migration failed; continuing");
    }
}

/// Builds the user store the dispatcher serves from.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>>;
}

pub struct PgConnector;

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self, config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
        let db = connect(config).await?;
        if config.run_migrations {
            migrate(&db).await;
        }
        Ok(Arc::new(PgUserStore::new(db)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> AppConfig {
        AppConfig {
            database_url: url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            max_connections: 1,
            run_migrations: false,
            lazy_init: false,
        }
    }

    #[tokio::test]
    async fn connect_rejects_empty_url() {
        let err = connect(&config("")).await.unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[tokio::test]
    async fn connect_reports_bad_url() {
        let err = connect(&config("not-a-url")).await.unwrap_err();
        assert!(format!("{err:#}").starts_with("open database connection"));
    }
}
