//! Client runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the shared `ApiClient`. Screens and services never read environment variables
//! themselves; binaries read them and hand the raw values to the `*_from_env_value` helpers.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_DATA_DIR, DEFAULT_TIMEOUT_SECS};
use crate::{ClientError, ClientResult};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    log_bodies: bool,
    data_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL must be absolute `http`/`https`. A trailing `/` is added when missing so
    /// relative endpoint paths join under it rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the URL cannot be parsed, uses another scheme, or the
    /// timeout is zero.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        log_bodies: bool,
        data_dir: PathBuf,
    ) -> ClientResult<Self> {
        let trimmed = base_url.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let base_url = Url::parse(&with_slash)
            .map_err(|e| ClientError::Config(format!("invalid base URL {trimmed:?}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base URL must use http or https, got {}",
                base_url.scheme()
            )));
        }

        if timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than zero".into()));
        }

        Ok(Self {
            base_url,
            timeout,
            log_bodies,
            data_dir,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn log_bodies(&self) -> bool {
        self.log_bodies
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Resolve the base URL from an optional raw value, falling back to the development backend.
pub fn base_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Parse the global timeout (whole seconds) from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 30 seconds.
pub fn timeout_from_env_value(value: Option<String>) -> ClientResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v
            .parse::<u64>()
            .map_err(|_| ClientError::Config(format!("timeout must be whole seconds, got {v:?}")))?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(Duration::from_secs(secs))
}

/// Interpret an optional on/off switch such as `MOMCARE_LOG_BODIES=1`.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1" | "true" | "yes" | "on")
    )
}

pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let cfg = ClientConfig::new(
            "http://localhost:3000/mevabe_api",
            Duration::from_secs(5),
            false,
            PathBuf::from("data"),
        )
        .unwrap();
        assert_eq!(cfg.base_url().as_str(), "http://localhost:3000/mevabe_api/");
        assert_eq!(
            cfg.base_url().join("login.php").unwrap().as_str(),
            "http://localhost:3000/mevabe_api/login.php"
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ClientConfig::new(
            "ftp://example.com/",
            Duration::from_secs(5),
            false,
            PathBuf::from("data"),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = ClientConfig::new(DEFAULT_BASE_URL, Duration::ZERO, false, PathBuf::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_env_value_helpers() {
        assert_eq!(base_url_from_env_value(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_from_env_value(Some("  ".into())), DEFAULT_BASE_URL);
        assert_eq!(
            timeout_from_env_value(Some("12".into())).unwrap(),
            Duration::from_secs(12)
        );
        assert_eq!(
            timeout_from_env_value(None).unwrap(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert!(timeout_from_env_value(Some("soon".into())).is_err());
        assert!(flag_from_env_value(Some("1".into())));
        assert!(!flag_from_env_value(Some("0".into())));
        assert!(!flag_from_env_value(None));
        assert_eq!(data_dir_from_env_value(None), PathBuf::from(DEFAULT_DATA_DIR));
    }
}
