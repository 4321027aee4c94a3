//! Configuration loading and representation.
//!
//! Everything is read from environment variables once at startup. Parsing goes
//! through [`AppConfig::from_lookup`] so tests can feed a map instead of
//! mutating the process environment.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crmdash_core::text::COMMENT_PREVIEW_LEN;
use crmdash_quotations::DEFAULT_SERVICE_CODE_PREFIX;

pub const DEFAULT_CRM_API_URL: &str = "https://axonaut.com/api/v2";
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Connection settings for the CRM API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Presentation settings shared by the page views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Rows kept from each server page of quotations.
    pub quotations_page_size: usize,
    pub projects_page_size: usize,
    pub companies_page_size: usize,
    /// Product-code prefix of service lines in quotations.
    pub service_code_prefix: String,
    pub comment_preview_len: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            quotations_page_size: 10,
            projects_page_size: 25,
            companies_page_size: 25,
            service_code_prefix: DEFAULT_SERVICE_CODE_PREFIX.to_string(),
            comment_preview_len: COMMENT_PREVIEW_LEN,
        }
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub crm: CrmConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("CRM_API_KEY").ok_or(ConfigError::Missing("CRM_API_KEY"))?;
        let base_url = get("CRM_API_URL")
            .unwrap_or_else(|| DEFAULT_CRM_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let defaults = DashboardConfig::default();
        let bind_addr = parse_or(&get, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let timeout_secs = parse_or(&get, "CRM_TIMEOUT_SECS", 10u64)?;
        let quotations_page_size =
            positive_or(&get, "QUOTATIONS_PAGE_SIZE", defaults.quotations_page_size)?;
        let projects_page_size =
            positive_or(&get, "PROJECTS_PAGE_SIZE", defaults.projects_page_size)?;
        let companies_page_size =
            positive_or(&get, "COMPANIES_PAGE_SIZE", defaults.companies_page_size)?;
        let comment_preview_len =
            positive_or(&get, "COMMENT_PREVIEW_LEN", defaults.comment_preview_len)?;
        let service_code_prefix =
            get("SERVICE_CODE_PREFIX").unwrap_or(defaults.service_code_prefix);

        Ok(Self {
            bind_addr,
            crm: CrmConfig {
                base_url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            dashboard: DashboardConfig {
                quotations_page_size,
                projects_page_size,
                companies_page_size,
                service_code_prefix,
                comment_preview_len,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn positive_or<G>(get: &G, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    positive(parse_or(get, key, default)?, key)
}

fn positive(value: usize, key: &'static str) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid { key, value: "0".to_string() });
    }
    Ok(value)
}
