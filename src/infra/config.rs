//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_NOTICE_TTL_MS: u64 = 3000;

fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(name)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("{} must be a valid number, got {:?}", name, raw))
        })
        .transpose()
}

/// Base URL of the catalog service (`CATALOG_API_URL`, default `http://localhost:5000`).
pub fn api_base_url() -> String {
    var("CATALOG_API_URL")
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub fn parse_page_size(raw: &str) -> anyhow::Result<NonZeroUsize> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .with_context(|| format!("page size must be a positive integer, got {:?}", raw))
}

/// Rows per list page (`CATALOG_PAGE_SIZE`, default 5). Zero is rejected.
pub fn page_size() -> anyhow::Result<NonZeroUsize> {
    match var("CATALOG_PAGE_SIZE") {
        Some(raw) => parse_page_size(&raw).context("CATALOG_PAGE_SIZE"),
        None => Ok(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN)),
    }
}

/// How long a success/error notice stays visible (`CATALOG_NOTICE_TTL_MS`, default 3000).
pub fn notice_ttl() -> anyhow::Result<Duration> {
    let ms = parse_var::<u64>("CATALOG_NOTICE_TTL_MS")?.unwrap_or(DEFAULT_NOTICE_TTL_MS);
    Ok(Duration::from_millis(ms))
}

/// Optional transport timeout (`CATALOG_REQUEST_TIMEOUT_SECS`). Unset means reqwest's default.
pub fn request_timeout() -> anyhow::Result<Option<Duration>> {
    Ok(parse_var::<u64>("CATALOG_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: NonZeroUsize,
    pub notice_ttl: Duration,
    pub request_timeout: Option<Duration>,
}

impl Settings {
    /// Loads `.env` (if present) and reads every setting.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            api_base_url: api_base_url(),
            page_size: page_size()?,
            notice_ttl: notice_ttl()?,
            request_timeout: request_timeout()?,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            notice_ttl: Duration::from_millis(DEFAULT_NOTICE_TTL_MS),
            request_timeout: None,
        }
    }
}
