//! HTTP health check value objects for deployed container instances.
//!
//! A [`HttpHealthCheck`] describes one endpoint that should be polled to
//! determine whether a running container instance is healthy. Instances hold
//! these in a set keyed by full value, so two checks with the same name, URL,
//! interval, and timeout are the same check.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default polling interval, in seconds.
pub const DEFAULT_INTERVAL_SECONDS: i32 = 60;

/// Default timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MILLIS: i64 = 0;

/// Validation failures raised when constructing a [`HttpHealthCheck`].
///
/// Each constraint has its own variant so callers can tell which argument
/// was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthCheckError {
    #[error("the health check name must not be empty")]
    EmptyName,

    #[error("the health check URL must not be empty")]
    EmptyUrl,

    #[error("{0} is not a valid URL")]
    MalformedUrl(String),

    #[error("the polling interval must be zero or a positive integer, but was {0}")]
    NegativeInterval(i32),

    #[error("the timeout must be zero or a positive integer, but was {0}")]
    NegativeTimeout(i64),
}

/// An HTTP health check associated with a deployed container instance.
///
/// Immutable once constructed; equality and hashing cover every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpHealthCheck {
    name: String,
    url: String,
    interval: i32,
    timeout: i64,
}

impl HttpHealthCheck {
    /// Creates a health check after validating every argument.
    ///
    /// The name and URL are trimmed. The URL must parse as a well-formed
    /// absolute URL, and the polling interval (seconds) and timeout
    /// (milliseconds) must both be zero or positive.
    ///
    /// # Errors
    ///
    /// Returns the [`HealthCheckError`] variant naming the first violated
    /// constraint, checked in argument order.
    pub fn new(name: &str, url: &str, interval: i32, timeout: i64) -> Result<Self, HealthCheckError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HealthCheckError::EmptyName);
        }

        let url = url.trim();
        if url.is_empty() {
            return Err(HealthCheckError::EmptyUrl);
        }
        if Url::parse(url).is_err() {
            return Err(HealthCheckError::MalformedUrl(url.to_string()));
        }

        if interval < 0 {
            return Err(HealthCheckError::NegativeInterval(interval));
        }
        if timeout < 0 {
            return Err(HealthCheckError::NegativeTimeout(timeout));
        }

        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
            interval,
            timeout,
        })
    }

    /// Returns the name of the health check.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL to poll.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the polling interval, in seconds.
    pub fn interval(&self) -> i32 {
        self.interval
    }

    /// Returns the timeout, in milliseconds.
    pub fn timeout(&self) -> i64 {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_check() {
        let check = HttpHealthCheck::new("ping", "http://example.com/health", 30, 1000)
            .expect("valid health check");

        assert_eq!(check.name(), "ping");
        assert_eq!(check.url(), "http://example.com/health");
        assert_eq!(check.interval(), 30);
        assert_eq!(check.timeout(), 1000);
    }

    #[test]
    fn test_name_and_url_are_trimmed() {
        let check = HttpHealthCheck::new("  ping  ", "  http://example.com/health  ", 60, 0)
            .expect("valid health check");

        assert_eq!(check.name(), "ping");
        assert_eq!(check.url(), "http://example.com/health");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = HttpHealthCheck::new("", "http://example.com", 60, 0).unwrap_err();
        assert_eq!(err, HealthCheckError::EmptyName);

        let err = HttpHealthCheck::new("   ", "http://example.com", 60, 0).unwrap_err();
        assert_eq!(err, HealthCheckError::EmptyName);
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = HttpHealthCheck::new("ping", "", 60, 0).unwrap_err();
        assert_eq!(err, HealthCheckError::EmptyUrl);
    }

    #[test]
    fn test_malformed_url_rejected() {
        let err = HttpHealthCheck::new("ping", "not a url", 60, 0).unwrap_err();
        assert_eq!(err, HealthCheckError::MalformedUrl("not a url".to_string()));
    }

    #[test]
    fn test_negative_interval_rejected() {
        let err = HttpHealthCheck::new("ping", "http://example.com", -1, 0).unwrap_err();
        assert_eq!(err, HealthCheckError::NegativeInterval(-1));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let err = HttpHealthCheck::new("ping", "http://example.com", 0, -1).unwrap_err();
        assert_eq!(err, HealthCheckError::NegativeTimeout(-1));
    }

    #[test]
    fn test_value_equality_and_hashing() {
        use std::collections::HashSet;

        let a = HttpHealthCheck::new("ping", "http://example.com/health", 60, 0).unwrap();
        let b = HttpHealthCheck::new("ping", "http://example.com/health", 60, 0).unwrap();
        let c = HttpHealthCheck::new("ping", "http://example.com/health", 30, 0).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let check = HttpHealthCheck::new("ping", "http://example.com/health", 60, 250).unwrap();

        let json = serde_json::to_string(&check).expect("serialize");
        let back: HttpHealthCheck = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, check);
    }
}
