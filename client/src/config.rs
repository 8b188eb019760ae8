//! Client configuration parsed from environment variables.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const API_BASE_URL_ENV: &str = "CERTLEDGER_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}

impl ClientConfig {
    /// Build a config with an explicit base URL (trailing `/` trimmed).
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self { api_base_url: normalize_base_url(base_url) }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CERTLEDGER_API_BASE_URL`: default `http://localhost:8080/api`
    ///
    /// In the browser there is no process environment, so this always yields
    /// the default.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::with_base_url(&raw),
            _ => Self::default(),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
