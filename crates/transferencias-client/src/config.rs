use std::time::Duration;

use crate::{ClientError, ClientResult};

pub const API_URL_VAR: &str = "TRANSFERENCIAS_API_URL";
pub const TIMEOUT_VAR: &str = "TRANSFERENCIAS_TIMEOUT_SECS";
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/transferencias";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://host/api/transferencias`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn for_url(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            base_url: normalize_base_url("--api-url", base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Resolves the service endpoint: explicit override, then environment, then
/// the local default.
pub fn resolve(url_override: Option<&str>) -> ClientResult<ApiConfig> {
    resolve_with(url_override, |name| std::env::var(name).ok())
}

#[doc(hidden)]
pub fn resolve_with<F>(url_override: Option<&str>, lookup: F) -> ClientResult<ApiConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = match url_override {
        Some(url) => normalize_base_url("--api-url", url)?,
        None => match lookup(API_URL_VAR).filter(|value| !value.trim().is_empty()) {
            Some(url) => normalize_base_url(API_URL_VAR, &url)?,
            None => DEFAULT_API_URL.to_string(),
        },
    };

    let timeout_secs = match lookup(TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ApiConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn normalize_base_url(variable: &str, raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host_and_path) if !host_and_path.is_empty() && !host_and_path.starts_with('/') => {
            Ok(trimmed.to_string())
        }
        Some(_) => Err(ClientError::config_invalid(variable, "the URL has no host")),
        None => Err(ClientError::config_invalid(
            variable,
            "expected an http:// or https:// URL",
        )),
    }
}

fn parse_timeout(raw: &str) -> ClientResult<u64> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ClientError::config_invalid(TIMEOUT_VAR, "expected a whole number of seconds"))?;
    if !(1..=MAX_TIMEOUT_SECS).contains(&parsed) {
        return Err(ClientError::config_invalid(
            TIMEOUT_VAR,
            &format!("expected a value between 1 and {MAX_TIMEOUT_SECS}"),
        ));
    }
    Ok(parsed)
}
