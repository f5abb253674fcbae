//! HTTP cache control module
//!
//! Builds the `Cache-Control` and `Expires` headers attached to served images.

use chrono::{DateTime, Duration, Utc};

/// Date layout for the `Expires` header (RFC 1123, always GMT)
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache control policy for image responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Fresh for the given number of seconds
    MaxAge(u32),
    /// No caching headers are emitted
    Disabled,
}

impl CachePolicy {
    /// Build a policy from the configured max-age, where 0 disables caching
    pub const fn from_max_age(max_age: u32) -> Self {
        if max_age == 0 {
            Self::Disabled
        } else {
            Self::MaxAge(max_age)
        }
    }

    /// `Cache-Control` header value, if any
    pub fn cache_control(self) -> Option<String> {
        match self {
            Self::MaxAge(max_age) => Some(format!("max-age={max_age}")),
            Self::Disabled => None,
        }
    }

    /// `Expires` header value relative to `now`, if any
    pub fn expires_at(self, now: DateTime<Utc>) -> Option<String> {
        match self {
            Self::MaxAge(max_age) => {
                let expiry = now + Duration::seconds(i64::from(max_age));
                Some(format_http_date(expiry))
            }
            Self::Disabled => None,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::MaxAge(3600) // 1 hour
    }
}

/// Format a timestamp as an HTTP date
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}
