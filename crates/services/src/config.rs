use std::env;
use std::time::Duration;

use buddy_core::model::ToolCatalog;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and which tools the client offers.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
    catalog: ToolCatalog,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog: ToolCatalog::default(),
        })
    }

    /// Read `BUDDY_API_URL`, `BUDDY_TOOLS` and `BUDDY_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = non_blank("BUDDY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let mut config = Self::new(&base_url)?;
        if let Some(tools) = non_blank("BUDDY_TOOLS") {
            config = config.with_tools(&tools)?;
        }
        if let Some(timeout) = non_blank("BUDDY_TIMEOUT_SECS") {
            config = config.with_timeout_secs(&timeout)?;
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for a malformed URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    /// Narrow the catalog to a comma separated list of known tools.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Tools` for unknown or malformed identifiers.
    pub fn with_tools(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.catalog = ToolCatalog::default().restricted_to_list(raw)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive integer.
    pub fn with_timeout_secs(mut self, raw: &str) -> Result<Self, ConfigError> {
        let secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidTimeout {
                raw: raw.to_string(),
            })?;
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: ToolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Absolute URL for a path relative to the API root (`"quiz/check"`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            raw: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}
