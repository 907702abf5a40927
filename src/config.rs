use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, SearchError};

// ==================== CONSTANTS ====================
pub struct Config;
impl Config {
    pub const FINDING_URL: &'static str = "https://svcs.ebay.com/services/search/FindingService/v1";
    pub const SERVICE_VERSION: &'static str = "1.0.0";
    pub const RESPONSE_DATA_FORMAT: &'static str = "JSON";
    pub const ENTRIES_PER_PAGE: u32 = 50;
    pub const PAGE_NUMBER: u32 = 1;
    pub const DISPLAY_LIMIT: usize = 10;
    pub const TIMEOUT_SECS: u64 = 30;
}

// ==================== FINDER CONFIG ====================
/// Settings injected into the search pipeline.
///
/// The application credential is always supplied from the outside. Note that
/// any client-only deployment hands this value to the end user; keep it behind
/// a proxy if it must stay confidential.
#[derive(Clone)]
pub struct FinderConfig {
    pub app_id: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub entries_per_page: u32,
    pub display_limit: usize,
}

impl FinderConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            endpoint: Config::FINDING_URL.to_string(),
            timeout: Duration::from_secs(Config::TIMEOUT_SECS),
            entries_per_page: Config::ENTRIES_PER_PAGE,
            display_limit: Config::DISPLAY_LIMIT,
        }
    }

    /// Read settings from the process environment.
    ///
    /// `EBAY_APP_ID` (or `EBAY_CLIENT_ID`) is required. `EBAY_FINDING_URL`,
    /// `EBAY_TIMEOUT_SECS`, `EBAY_ENTRIES_PER_PAGE` and `EBAY_DISPLAY_LIMIT`
    /// override the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup("EBAY_APP_ID")
            .or_else(|| lookup("EBAY_CLIENT_ID"))
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                SearchError::Config("missing EBAY_APP_ID (or EBAY_CLIENT_ID)".to_string())
            })?;

        let mut config = Self::new(app_id);
        if let Some(endpoint) = lookup("EBAY_FINDING_URL") {
            config.endpoint = endpoint;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "EBAY_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(entries) = parse_var::<u32, _>(&lookup, "EBAY_ENTRIES_PER_PAGE")? {
            config.entries_per_page = entries;
        }
        if let Some(limit) = parse_var::<usize, _>(&lookup, "EBAY_DISPLAY_LIMIT")? {
            config.display_limit = limit;
        }
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_entries_per_page(mut self, entries: u32) -> Self {
        self.entries_per_page = entries;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("app_id", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("entries_per_page", &self.entries_per_page)
            .field("display_limit", &self.display_limit)
            .finish()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SearchError::Config(format!("{} is not a valid number: {:?}", key, raw))),
    }
}
