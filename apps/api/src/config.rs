use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_APP_NAME: &str = "자소서 AI";
pub const DEFAULT_APP_DESCRIPTION: &str = "AI가 도와주는 완벽한 자기소개서 작성 서비스";

/// Backend lookup order. The first non-empty variable wins.
const BACKEND_URL_VARS: &[&str] = &["BACKEND_API_URL", "NEXT_PUBLIC_BACKEND_URL"];

/// Application configuration loaded once at startup from environment variables.
/// Nothing else in the crate reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub app_name: String,
    pub app_description: String,
    pub cors_allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Everything the generation gateway needs to reach the backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base address without a trailing slash.
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Total attempts per call, never less than 1.
    pub max_attempts: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            max_attempts: 1,
        }
    }
}

impl BackendConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = BackendConfig {
            api_key: optional_env("BACKEND_API_KEY"),
            timeout: Duration::from_secs(
                parse_env("BACKEND_TIMEOUT_SECS", 60)
                    .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_attempts: parse_env::<u32>("BACKEND_MAX_ATTEMPTS", 1)
                .context("BACKEND_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            ..BackendConfig::with_base_url(resolve_backend_url(|key| std::env::var(key).ok()))
        };

        Ok(Config {
            backend,
            app_name: optional_env("NEXT_PUBLIC_APP_NAME")
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_description: optional_env("NEXT_PUBLIC_APP_DESCRIPTION")
                .unwrap_or_else(|| DEFAULT_APP_DESCRIPTION.to_string()),
            cors_allowed_origins: optional_env("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
            port: parse_env("PORT", 3000).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Fallback log filter when `RUST_LOG` is unset or does not parse.
    /// Request and response lines from `TraceLayer` use the `tower_http` target.
    pub fn default_log_directive(&self, crate_target: &str) -> String {
        format!(
            "{crate_target}={level},tower_http={level}",
            level = self.rust_log
        )
    }
}

/// Picks the backend base address from the first non-empty lookup, falling
/// back to the local default.
fn resolve_backend_url(lookup: impl Fn(&str) -> Option<String>) -> String {
    BACKEND_URL_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .map(|value| normalize_base_url(&value))
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_backend_url_defaults_to_localhost() {
        assert_eq!(resolve_backend_url(lookup_from(&[])), "http://localhost:8080");
    }

    #[test]
    fn test_backend_url_prefers_first_variable() {
        let lookup = lookup_from(&[
            ("BACKEND_API_URL", "http://backend:9000"),
            ("NEXT_PUBLIC_BACKEND_URL", "http://public:9001"),
        ]);
        assert_eq!(resolve_backend_url(lookup), "http://backend:9000");
    }

    #[test]
    fn test_backend_url_skips_empty_first_variable() {
        let lookup = lookup_from(&[
            ("BACKEND_API_URL", "  "),
            ("NEXT_PUBLIC_BACKEND_URL", "http://public:9001/"),
        ]);
        assert_eq!(resolve_backend_url(lookup), "http://public:9001");
    }

    #[test]
    fn test_split_origins_drops_blanks() {
        assert_eq!(
            split_origins("http://localhost:3000, ,https://example.com"),
            vec!["http://localhost:3000", "https://example.com"]
        );
    }

    #[test]
    fn test_parse_env_rejects_non_numeric_value() {
        std::env::set_var("RESUME_GATEWAY_TEST_TIMEOUT_BAD", "abc");
        let err = parse_env::<u64>("RESUME_GATEWAY_TEST_TIMEOUT_BAD", 60).unwrap_err();
        assert!(err.to_string().contains("Invalid value 'abc'"));
    }

    #[test]
    fn test_parse_env_blank_value_uses_default() {
        std::env::set_var("RESUME_GATEWAY_TEST_TIMEOUT_BLANK", "  ");
        assert_eq!(
            parse_env::<u64>("RESUME_GATEWAY_TEST_TIMEOUT_BLANK", 60).unwrap(),
            60
        );
        assert_eq!(
            parse_env::<u64>("RESUME_GATEWAY_TEST_TIMEOUT_UNSET", 45).unwrap(),
            45
        );
    }

    #[test]
    fn test_parse_env_accepts_padded_number() {
        std::env::set_var("RESUME_GATEWAY_TEST_ATTEMPTS", " 3 ");
        assert_eq!(parse_env::<u32>("RESUME_GATEWAY_TEST_ATTEMPTS", 1).unwrap(), 3);
    }

    #[test]
    fn test_default_log_directive_enables_request_tracing() {
        let config = Config {
            backend: BackendConfig::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_description: DEFAULT_APP_DESCRIPTION.to_string(),
            cors_allowed_origins: vec![],
            port: 3000,
            rust_log: "info".to_string(),
        };
        assert_eq!(
            config.default_log_directive("resume_ai_gateway"),
            "resume_ai_gateway=info,tower_http=info"
        );
    }

    #[test]
    fn test_backend_config_default_is_single_attempt() {
        let backend = BackendConfig::default();
        assert_eq!(backend.max_attempts, 1);
        assert_eq!(backend.timeout, Duration::from_secs(60));
        assert!(backend.api_key.is_none());
    }
}
