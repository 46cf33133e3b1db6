// storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  /// `None` keeps preferences in memory (set `PREFERENCES_PATH` to an empty value).
  pub preferences_path: Option<String>,
  /// Simulated latency applied before every sign-in.
  pub login_delay: Duration,
  /// Installs the catalog seeder as the store's first-creation hook.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let server_host = env_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_env("SERVER_PORT", 8080u16)?;
    let database_url = env_or("DATABASE_URL", "sqlite://storefront.db");
    let preferences_path = Some(env_or("PREFERENCES_PATH", "storefront_prefs.json")).filter(|p| !p.trim().is_empty());
    let login_delay = Duration::from_millis(parse_env("LOGIN_DELAY_MS", 3000u64)?);
    let seed_db = parse_env("SEED_DB", true)?;

    tracing::info!(%database_url, seed_db, "Application configuration loaded.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      preferences_path,
      login_delay,
      seed_db,
    })
  }

  /// Seeded in-memory store, in-memory preferences, no login delay.
  #[cfg(test)]
  pub fn in_memory() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "sqlite::memory:".to_string(),
      preferences_path: None,
      login_delay: Duration::ZERO,
      seed_db: true,
    }
  }
}

fn env_or(var_name: &str, default: &str) -> String {
  env::var(var_name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_variables_fall_back_to_defaults() {
    assert_eq!(parse_env("STOREFRONT_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);
    assert_eq!(env_or("STOREFRONT_TEST_UNSET_HOST", "0.0.0.0"), "0.0.0.0");
  }

  #[test]
  fn malformed_values_are_config_errors() {
    env::set_var("STOREFRONT_TEST_BAD_BOOL", "maybe");
    let err = parse_env("STOREFRONT_TEST_BAD_BOOL", true).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    env::remove_var("STOREFRONT_TEST_BAD_BOOL");
  }
}
