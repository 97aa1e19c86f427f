//! Rate-limit telemetry reported by the Miro API.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::error::{MiroError, Result};

pub(crate) const RATE_LIMIT_LIMIT_HEADER: &str = "X-RateLimit-Limit";
pub(crate) const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";
pub(crate) const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Credits assumed before the first response has been seen.
pub const DEFAULT_RATE_LIMIT: i64 = 10_000;

/// The client's view of the API's throttling counters.
///
/// Updated from response headers after every call. A field only changes when
/// its header is present on a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Credits per window.
    pub limit: i64,
    /// Credits left in the current window.
    pub remaining: i64,
    /// When the current window resets, once the API has said so.
    pub reset: Option<DateTime<Utc>>,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RATE_LIMIT,
            remaining: DEFAULT_RATE_LIMIT,
            reset: None,
        }
    }
}

/// Read an integer header. Absent or empty headers are `None`.
pub(crate) fn integer_header(headers: &HeaderMap, name: &'static str) -> Result<Option<i64>> {
    let Some(raw) = headers.get(name) else {
        return Ok(None);
    };

    let invalid = || MiroError::RateLimitHeader {
        header: name,
        value: String::from_utf8_lossy(raw.as_bytes()).into_owned(),
    };

    let value = raw.to_str().map_err(|_| invalid())?.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| invalid())
}

/// Read the reset header as a unix timestamp in seconds.
pub(crate) fn reset_header(headers: &HeaderMap) -> Result<Option<DateTime<Utc>>> {
    let Some(secs) = integer_header(headers, RATE_LIMIT_RESET_HEADER)? else {
        return Ok(None);
    };
    DateTime::from_timestamp(secs, 0)
        .map(Some)
        .ok_or_else(|| MiroError::RateLimitHeader {
            header: RATE_LIMIT_RESET_HEADER,
            value: secs.to_string(),
        })
}
