//! Retry classification and backoff policy for outbound movie API calls.
//!
//! The fetch loop in [`crate::fetch`] drives the attempts; this module owns
//! the decisions: which statuses are cooperative throttling versus terminal,
//! how long to back off, and how to read the server's own wait hint.

use std::time::Duration;

use reqwest::{header, StatusCode};

/// Upper bound applied to a server-supplied `Retry-After` hint so a hostile
/// or misconfigured upstream cannot stall a logical call.
const RETRY_AFTER_CAP: Duration = Duration::from_secs(60);

/// Classification of an HTTP response status for retry purposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StatusClass {
    /// 2xx: decode the body and return it.
    Success,
    /// 429: cooperative throttle; wait without consuming attempt budget.
    Throttled,
    /// Everything else: retrying will not change the answer.
    Terminal,
}

/// Classifies a response status. All non-2xx statuses other than 429 are
/// terminal, including 5xx: the upstream API answers; repeating the request
/// is the caller's decision, not this layer's.
pub(crate) fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        StatusClass::Throttled
    } else {
        StatusClass::Terminal
    }
}

/// Short label for a transport-level error, used in attempt diagnostics.
/// Every transport error is transient; the label only records which kind.
pub(crate) fn transport_label(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else {
        "transport"
    }
}

/// Backoff before the attempt after `attempt`: linear in the attempt index,
/// `base_ms × attempt`.
pub(crate) fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(u64::from(attempt)))
}

/// Reads a delta-seconds `Retry-After` hint, clamped to [`RETRY_AFTER_CAP`].
/// Absent, unparsable, or HTTP-date values yield `None` and the caller falls
/// back to the computed backoff.
pub(crate) fn retry_after(headers: &header::HeaderMap) -> Option<Duration> {
    let seconds = headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;
    Some(Duration::from_secs(seconds).min(RETRY_AFTER_CAP))
}

/// Wait before re-running a throttled attempt: the server hint when present,
/// otherwise the same linear backoff a transient failure would use.
pub(crate) fn throttle_delay(hint: Option<Duration>, base_ms: u64, attempt: u32) -> Duration {
    hint.unwrap_or_else(|| backoff_delay(base_ms, attempt))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
    use reqwest::StatusCode;

    use super::{backoff_delay, classify_status, retry_after, throttle_delay, StatusClass};

    #[test]
    fn success_statuses_classify_as_success() {
        assert_eq!(classify_status(StatusCode::OK), StatusClass::Success);
        assert_eq!(classify_status(StatusCode::CREATED), StatusClass::Success);
    }

    #[test]
    fn too_many_requests_is_throttled() {
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            StatusClass::Throttled
        );
    }

    #[test]
    fn non_success_statuses_are_terminal_including_5xx() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND), StatusClass::Terminal);
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            StatusClass::Terminal
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            StatusClass::Terminal
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            StatusClass::Terminal
        );
    }

    #[test]
    fn backoff_grows_linearly_with_attempt_index() {
        assert_eq!(backoff_delay(2_000, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2_000, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(2_000, 3), Duration::from_secs(6));
    }

    #[test]
    fn retry_after_reads_delta_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));
    }

    #[test]
    fn retry_after_is_clamped() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("86400"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(60)));
    }

    #[test]
    fn retry_after_ignores_missing_or_unparsable_values() {
        assert_eq!(retry_after(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(retry_after(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn throttle_delay_prefers_the_server_hint() {
        let hint = Some(Duration::from_secs(9));
        assert_eq!(throttle_delay(hint, 2_000, 3), Duration::from_secs(9));
        assert_eq!(throttle_delay(None, 2_000, 3), Duration::from_secs(6));
    }
}
