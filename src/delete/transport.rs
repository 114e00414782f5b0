//! HTTP transport for delete requests.
//!
//! [`DeleteTransport`] is the seam between the deleter's policy and the
//! network. [`HttpTransport`] is the real implementation on top of a blocking
//! `reqwest` client; tests plug in scripted responses instead.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use tracing::debug;

use super::ratelimit::RateLimitSignals;
use crate::config::{Auth, DeleterConfig};
use crate::error::{PurgeError, Result};

/// Header carrying requests left in the bucket.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the bucket reset epoch.
pub const HEADER_RESET: &str = "x-ratelimit-reset";
/// Header carrying the throttle back-off in seconds.
pub const HEADER_RETRY_AFTER: &str = "retry-after";

/// The parts of a delete response the deleter acts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded rate-limit headers.
    pub signals: RateLimitSignals,
}

impl DeleteResponse {
    /// A response with the given status and no rate-limit headers.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            signals: RateLimitSignals::default(),
        }
    }

    /// Attaches rate-limit signals.
    #[must_use]
    pub fn with_signals(mut self, signals: RateLimitSignals) -> Self {
        self.signals = signals;
        self
    }

    /// Returns `true` for 429.
    pub fn is_throttled(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }
}

/// Issues one `DELETE` and reports what came back.
pub trait DeleteTransport {
    /// Sends `DELETE url` authenticated with `auth`.
    ///
    /// # Errors
    ///
    /// Only failures that produced no HTTP response are errors; every status
    /// code, 4xx and 5xx included, is an `Ok`.
    fn delete(&mut self, url: &str, auth: &Auth) -> Result<DeleteResponse>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::Http`] if the client cannot be configured.
    pub fn new(config: &DeleterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl DeleteTransport for HttpTransport {
    fn delete(&mut self, url: &str, auth: &Auth) -> Result<DeleteResponse> {
        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, auth.header_value())
            .send()
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    "timed out"
                } else if e.is_connect() {
                    "connection failed"
                } else {
                    "request failed"
                };
                PurgeError::transport(url, format!("{kind}: {e}"))
            })?;

        let signals = signals_from_headers(response.headers());
        debug!(url, ?signals, "rate-limit headers");

        Ok(DeleteResponse {
            status: response.status().as_u16(),
            signals,
        })
    }
}

/// Decodes the rate-limit headers. Unparsable values count as absent.
pub fn signals_from_headers(headers: &HeaderMap) -> RateLimitSignals {
    let number = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };

    RateLimitSignals {
        remaining: number(HEADER_REMAINING).map(|v| v as i64),
        reset_at: number(HEADER_RESET),
        retry_after: number(HEADER_RETRY_AFTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_signals_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1470173023.123"));

        let signals = signals_from_headers(&headers);
        assert_eq!(signals.remaining, Some(0));
        assert_eq!(signals.reset_at, Some(1470173023.123));
        assert_eq!(signals.retry_after, None);
    }

    #[test]
    fn test_signals_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from_static("2"));

        let signals = signals_from_headers(&headers);
        assert_eq!(signals.retry_after, Some(2.0));
        assert_eq!(signals.remaining, None);
    }

    #[test]
    fn test_signals_garbage_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("lots"));
        headers.insert("Retry-After", HeaderValue::from_static("NaN"));

        assert_eq!(signals_from_headers(&headers), RateLimitSignals::default());
    }

    #[test]
    fn test_response_helpers() {
        assert!(DeleteResponse::status(429).is_throttled());
        assert!(!DeleteResponse::status(204).is_throttled());
    }

    #[test]
    fn test_transport_error_for_unreachable_host() {
        let config = DeleterConfig::new().with_timeout(std::time::Duration::from_secs(2));
        let mut transport = HttpTransport::new(&config).unwrap();
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let err = transport
            .delete("http://127.0.0.1:9/1/messages/2", &Auth::Bot("x".into()))
            .unwrap_err();
        assert!(err.is_transport());
    }
}
