use anyhow::{bail, Context};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub lazy_init: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(v) if !v.trim().is_empty() => v,
            _ => bail!("DATABASE_URL environment variable is not set"),
        };

        let port = match lookup("APP_PORT") {
            Some(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            None => 8080,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => bail!("DB_MAX_CONNECTIONS must be a positive integer, got {v:?}"),
            },
            None => 10,
        };

        Ok(Self {
            database_url,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            max_connections,
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            lazy_init: lookup("LAZY_INIT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
