use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "evcare.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api base url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Deployment flavour, read from `VITE_APP_ENV` like the web build did.
/// Anything other than an explicit development value is treated as
/// production, including an unset variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

impl AppEnv {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }

    /// Request-level logging is only emitted in development.
    pub fn verbose_logging(&self) -> bool {
        *self == Self::Development
    }

    pub fn default_log_directive(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "warn",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub api_token: Option<String>,
    /// `None` keeps the HTTP client's own default.
    pub timeout_seconds: Option<u64>,
    pub app_env: AppEnv,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            api_token: None,
            timeout_seconds: None,
            app_env: AppEnv::Production,
        }
    }
}

impl ClientSettings {
    /// Parsed base url; only http(s) is accepted.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.api_base_url.trim()).map_err(|source| {
            ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                source,
            }
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    api_token: Option<String>,
    timeout_seconds: Option<u64>,
    app_env: Option<String>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file when it exists and parses, then environment.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.api_base_url {
                settings.api_base_url = v;
            }
            if let Some(v) = file_cfg.api_token {
                settings.api_token = Some(v);
            }
            if let Some(v) = file_cfg.timeout_seconds {
                settings.timeout_seconds = Some(v);
            }
            if let Some(v) = file_cfg.app_env {
                settings.app_env = AppEnv::parse(&v);
            }
        }
    }

    if let Some(v) = env("EVCARE_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("EVCARE_API_TOKEN") {
        settings.api_token = Some(v);
    }

    if let Some(v) = env("EVCARE_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.timeout_seconds = Some(parsed);
        }
    }

    if let Some(v) = env("VITE_APP_ENV") {
        settings.app_env = AppEnv::parse(&v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
