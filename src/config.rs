use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;

/// Startup mode; decides what happens when the schema cannot be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("production") {
            Ok(AppEnv::Production)
        } else {
            Ok(AppEnv::Development)
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub env: AppEnv,
    pub migrations_dir: PathBuf,
    pub max_connections: u32,
    pub api_url: Option<String>,
    pub keep_alive_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("Failed to load environment variable DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = first_var(&["PORT", "APP_PORT"])
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5001);
        let env = first_var(&["NODE_ENV", "APP_ENV"])
            .map(|v| v.parse::<AppEnv>().unwrap_or(AppEnv::Development))
            .unwrap_or(AppEnv::Development);
        let migrations_dir = env::var("MIGRATIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("migrations"));
        let max_connections = env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let api_url = env::var("API_URL").ok().filter(|v| !v.trim().is_empty());
        let keep_alive_interval = env::var("KEEP_ALIVE_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(14 * 60));

        Ok(Self {
            database_url,
            host,
            port,
            env,
            migrations_dir,
            max_connections,
            api_url,
            keep_alive_interval,
        })
    }
}

fn first_var(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env::var(key).ok())
}
