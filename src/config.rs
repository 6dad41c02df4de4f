//! Backend connectivity configuration with builder pattern and environment
//! variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! The base URL has no default; a missing one is reported, never masked.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL (required).
pub const ENV_BASE_URL: &str = "ONLYSAIDKB_BASE_URL";
/// Environment variable holding the default generation model.
pub const ENV_DEFAULT_MODEL: &str = "ONLYSAIDKB_DEFAULT_MODEL";
/// Environment variable holding the default retrieval depth.
pub const ENV_DEFAULT_TOP_K: &str = "ONLYSAIDKB_DEFAULT_TOP_K";
/// Environment variable holding the default response language.
pub const ENV_DEFAULT_LANGUAGE: &str = "ONLYSAIDKB_DEFAULT_LANGUAGE";
/// Environment variable holding the per-request timeout in seconds.
pub const ENV_TIMEOUT: &str = "ONLYSAIDKB_TIMEOUT";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gpt-4";
/// Default number of documents to retrieve.
pub const DEFAULT_TOP_K: u32 = 5;
/// Default response language tag.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable backend configuration, shared read-only by every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KbConfig {
    /// Backend base URL without trailing slash (e.g. `http://localhost:8000/api/kb`).
    pub base_url: String,
    /// Model reported in debug metadata; the backend applies it when none is sent.
    pub default_model: String,
    /// Retrieval depth used when a retrieve call omits `top_k`.
    pub default_top_k: u32,
    /// Language reported in debug metadata.
    pub default_language: String,
    /// Upper bound for a single backend request.
    pub timeout: Duration,
}

impl KbConfig {
    /// Creates a new builder for `KbConfig`.
    #[must_use]
    pub fn builder() -> KbConfigBuilder {
        KbConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] if the base URL is unset and
    /// [`ConfigError::InvalidValue`] for unparsable numeric settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env()?.build()
    }
}

/// Builder for [`KbConfig`].
#[derive(Debug, Clone, Default)]
pub struct KbConfigBuilder {
    base_url: Option<String>,
    default_model: Option<String>,
    default_top_k: Option<u32>,
    default_language: Option<String>,
    timeout: Option<Duration>,
}

impl KbConfigBuilder {
    /// Populates unset fields from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numeric settings.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        self.from_source(|name| std::env::var(name).ok())
    }

    /// Populates unset fields from an arbitrary name → value lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numeric settings.
    pub fn from_source<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.base_url.is_none() {
            self.base_url = get(ENV_BASE_URL);
        }
        if self.default_model.is_none() {
            self.default_model = get(ENV_DEFAULT_MODEL);
        }
        if self.default_language.is_none() {
            self.default_language = get(ENV_DEFAULT_LANGUAGE);
        }
        if self.default_top_k.is_none()
            && let Some(raw) = get(ENV_DEFAULT_TOP_K)
        {
            self.default_top_k = Some(parse_positive(ENV_DEFAULT_TOP_K, &raw)?);
        }
        if self.timeout.is_none()
            && let Some(raw) = get(ENV_TIMEOUT)
        {
            let secs = parse_positive(ENV_TIMEOUT, &raw)?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Sets the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Sets the default top-k.
    #[must_use]
    pub const fn default_top_k(mut self, n: u32) -> Self {
        self.default_top_k = Some(n);
        self
    }

    /// Sets the default language.
    #[must_use]
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Builds the [`KbConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] if no base URL was set, and
    /// [`ConfigError::InvalidValue`] if a zero top-k or timeout was set.
    pub fn build(self) -> Result<KbConfig, ConfigError> {
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVariables {
                names: vec![ENV_BASE_URL],
            })?;

        let default_top_k = self.default_top_k.unwrap_or(DEFAULT_TOP_K);
        if default_top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: ENV_DEFAULT_TOP_K,
                value: "0".to_string(),
                reason: "must be a positive integer",
            });
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: ENV_TIMEOUT,
                value: "0".to_string(),
                reason: "must be a positive integer",
            });
        }

        Ok(KbConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            default_model: self
                .default_model
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_top_k,
            default_language: self
                .default_language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            timeout,
        })
    }
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v != T::default() => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: "must be a positive integer",
        }),
    }
}
