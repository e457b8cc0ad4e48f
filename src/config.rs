/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, 認証 strategy 用の token/key, default strategy など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub http_body_limit_bytes: usize,
    pub http_timeout: Duration,

    /// `(token, subject)` pairs for the `bearer` strategy.
    pub bearer_tokens: Vec<(String, String)>,
    /// `(key, subject)` pairs for the `api-key` strategy.
    pub api_keys: Vec<(String, String)>,
    pub default_strategy: Option<String>,
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("http_body_limit_bytes", &self.http_body_limit_bytes)
            .field("http_timeout", &self.http_timeout)
            .field("bearer_tokens", &self.bearer_tokens.len())
            .field("api_keys", &self.api_keys.len())
            .field("default_strategy", &self.default_strategy)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = get("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let http_body_limit_bytes = get("HTTP_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let http_timeout = get("HTTP_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let bearer_tokens = parse_pairs(
            &get("AUTH_BEARER_TOKENS").unwrap_or_default(),
            "AUTH_BEARER_TOKENS",
        )?;
        let api_keys = parse_pairs(&get("AUTH_API_KEYS").unwrap_or_default(), "AUTH_API_KEYS")?;

        let default_strategy = get("AUTH_DEFAULT_STRATEGY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            addr,
            app_env,
            http_body_limit_bytes,
            http_timeout,
            bearer_tokens,
            api_keys,
            default_strategy,
        })
    }
}

/// `secret=subject,secret=subject`
fn parse_pairs(raw: &str, key: &'static str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (secret, subject) = pair.split_once('=').ok_or(ConfigError::Invalid(key))?;
            let (secret, subject) = (secret.trim(), subject.trim());
            if secret.is_empty() || subject.is_empty() {
                return Err(ConfigError::Invalid(key));
            }
            Ok((secret.to_string(), subject.to_string()))
        })
        .collect()
}
