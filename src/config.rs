//! Process configuration loaded once from environment variables.
//!
//! ## Required
//! - `SHOPIFY_STORE_URL` - store domain (your-store.myshopify.com) or full base URL
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2023-10)
//! - `APP_ENV` - `production` makes missing settings fatal (default: development)
//! - `ALLOWED_ORIGINS` - comma-separated CORS origins, production only
//! - `PORT` - listen port (default: 5010)
//! - `STATIC_DIR` - directory served under `/static` (default: static)

use secrecy::SecretString;
use std::{env, fmt, path::PathBuf};
use thiserror::Error;

pub const STORE_URL_VAR: &str = "SHOPIFY_STORE_URL";
pub const ACCESS_TOKEN_VAR: &str = "SHOPIFY_ACCESS_TOKEN";
pub const STORE_URL_EXAMPLE: &str = "your-store.myshopify.com";
pub const ACCESS_TOKEN_EXAMPLE: &str = "shpat_your_token_here";

const DEFAULT_API_VERSION: &str = "2023-10";
const DEFAULT_PORT: u16 = 5010;
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn label(self) -> &'static str {
        match self {
            Environment::Development => "DEVELOPMENT",
            Environment::Production => "PRODUCTION",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: Option<String>,
    pub access_token: Option<SecretString>,
    pub api_version: String,
    pub environment: Environment,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub static_dir: PathBuf,
}

/// Complete upstream credentials, only available when both required
/// settings are present.
#[derive(Clone)]
pub struct StoreCredentials {
    pub base_url: String,
    pub access_token: SecretString,
    pub api_version: String,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidEnvVar("PORT", err.to_string()))?,
            None => DEFAULT_PORT,
        };

        let environment = match read("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let allowed_origins = read("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            store_url: read(STORE_URL_VAR),
            access_token: read(ACCESS_TOKEN_VAR).map(SecretString::from),
            api_version: read("SHOPIFY_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            environment,
            allowed_origins,
            port,
            static_dir: read("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Names of required variables that are unset.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.store_url.is_none() {
            missing.push(STORE_URL_VAR);
        }
        if self.access_token.is_none() {
            missing.push(ACCESS_TOKEN_VAR);
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn store(&self) -> Option<StoreCredentials> {
        let store_url = self.store_url.as_deref()?;
        let access_token = self.access_token.as_ref()?;
        Some(StoreCredentials {
            base_url: normalize_base_url(store_url),
            access_token: access_token.clone(),
            api_version: self.api_version.clone(),
        })
    }
}

fn normalize_base_url(store_url: &str) -> String {
    let trimmed = store_url.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
