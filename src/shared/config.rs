use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from the environment (and `.env` via dotenvy).
///
/// | Env Var                  | Default                          |
/// |--------------------------|----------------------------------|
/// | `HOST`                   | `0.0.0.0`                        |
/// | `PORT`                   | `3000`                           |
/// | `DATABASE_URL`           | unset (in-memory list store)     |
/// | `AUTH_URL`               | unset (every caller anonymous)   |
/// | `AUTH_API_KEY`           | empty                            |
/// | `ANILIST_URL`            | `https://graphql.anilist.co`     |
/// | `JIKAN_URL`              | `https://api.jikan.moe/v4`       |
/// | `HTTP_TIMEOUT_SECS`      | `15`                             |
/// | `SUGGESTION_TTL_SECS`    | `300`                            |
/// | `SUGGESTION_CAPACITY`    | `100`                            |
/// | `SUGGESTION_DEBOUNCE_MS` | `1000`                           |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub auth_url: Option<String>,
    pub auth_api_key: String,
    pub anilist_url: String,
    pub jikan_url: String,
    pub http_timeout: Duration,
    pub suggestion_ttl: Duration,
    pub suggestion_capacity: usize,
    pub suggestion_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            auth_url: None,
            auth_api_key: String::new(),
            anilist_url: "https://graphql.anilist.co".to_string(),
            jikan_url: "https://api.jikan.moe/v4".to_string(),
            http_timeout: Duration::from_secs(15),
            suggestion_ttl: Duration::from_secs(300),
            suggestion_capacity: 100,
            suggestion_debounce: Duration::from_millis(1000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            database_url: non_empty_var("DATABASE_URL"),
            auth_url: non_empty_var("AUTH_URL"),
            auth_api_key: env::var("AUTH_API_KEY").unwrap_or(defaults.auth_api_key),
            anilist_url: env::var("ANILIST_URL").unwrap_or(defaults.anilist_url),
            jikan_url: env::var("JIKAN_URL").unwrap_or(defaults.jikan_url),
            http_timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 15u64)?),
            suggestion_ttl: Duration::from_secs(parse_var("SUGGESTION_TTL_SECS", 300u64)?),
            suggestion_capacity: parse_var("SUGGESTION_CAPACITY", defaults.suggestion_capacity)?,
            suggestion_debounce: Duration::from_millis(parse_var(
                "SUGGESTION_DEBOUNCE_MS",
                1000u64,
            )?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::ValidationError(format!("{} has an invalid value: '{}'", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_bounds() {
        let config = AppConfig::default();
        assert_eq!(config.suggestion_capacity, 100);
        assert_eq!(config.suggestion_debounce, Duration::from_secs(1));
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: u16 = parse_var("ANISHELF_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
