mod app;
mod config;
mod db;
mod dispatcher;
mod error;
mod state;
mod users;
mod views;

use crate::{config::AppConfig, db::PgConnector, dispatcher::Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userdesk=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "invalid configuration");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr();
    let lazy = config.lazy_init;
    let dispatcher = Dispatcher::new(config, PgConnector);

    if !lazy {
        dispatcher.router().await;
    }
    tracing::info!(ready = dispatcher.is_ready(), lazy, "dispatcher configured");

    app::serve(&addr, dispatcher.into_service()).await
}
