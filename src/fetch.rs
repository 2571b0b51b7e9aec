use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::retry::{
    backoff_delay, classify_status, retry_after, throttle_delay, transport_label, StatusClass,
};
use crate::{FetchOptions, MovieDbError, Query, Result};

/// Outcome of one logical fetch.
///
/// Every way of giving up funnels into [`FetchOutcome::Failure`] with no
/// further detail: exhausted retries, a reached throttle ceiling, and
/// terminal HTTP statuses all look identical to the caller, who reports one
/// generic "try again later" condition. The only `Err` a logical call can
/// produce is a malformed body on a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// Decoded 2xx response body, owned by the caller.
    Success(serde_json::Value),
    /// The call gave up; no payload, no partial body.
    Failure,
}

/// Classified result of a single physical attempt.
enum AttemptOutcome {
    /// 2xx with the full body read.
    Body(String),
    /// 429, with the server's wait hint when one was sent.
    Throttled(Option<Duration>),
    /// Any other non-2xx status.
    Terminal(StatusCode),
    /// Transport-level failure; the label only feeds diagnostics.
    Transient(&'static str),
}

/// HTTP GET component with bounded retries and rate-limit cooperation.
///
/// Stateless between invocations: each logical call owns its attempt counter
/// and throttle budget, so concurrent calls share nothing but the underlying
/// connection pool.
#[derive(Clone, Debug)]
pub struct Fetcher {
    http: reqwest::Client,
    options: FetchOptions,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Creates a fetcher with the default attempt budget and timing.
    pub fn new() -> Self {
        Self::with_options(FetchOptions::default())
    }

    /// Creates a fetcher with explicit timing and budget configuration.
    pub fn with_options(options: FetchOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            options,
        }
    }

    /// Performs one logical fetch: GET `url` with `query`, decoding a 2xx
    /// body as JSON.
    ///
    /// Transient transport failures (timeouts, refused connections, DNS) are
    /// retried with a linear backoff up to the attempt budget. A 429 answer
    /// waits out the server's `Retry-After` hint (or the computed backoff)
    /// and re-runs the same attempt index without consuming budget, up to
    /// the separate throttle ceiling. Any other non-2xx status ends the call
    /// immediately.
    ///
    /// Dropping the returned future cancels the in-flight request or backoff
    /// sleep promptly; no retry continues past cancellation.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json(&self, url: &str, query: &Query) -> Result<FetchOutcome> {
        let mut throttle_waits = 0u32;
        let mut attempt = 1u32;

        while attempt <= self.options.max_attempts {
            match self.attempt_get(url, query).await {
                AttemptOutcome::Body(body) => {
                    debug!(attempt, "fetch succeeded");
                    let decoded =
                        serde_json::from_str::<serde_json::Value>(&body).map_err(|err| {
                            MovieDbError::Decode(format!(
                                "invalid response JSON: {err}; body: {body}"
                            ))
                        })?;
                    return Ok(FetchOutcome::Success(decoded));
                }
                AttemptOutcome::Throttled(hint) => {
                    if throttle_waits >= self.options.max_throttle_waits {
                        warn!(attempt, throttle_waits, "throttle ceiling reached, giving up");
                        return Ok(FetchOutcome::Failure);
                    }
                    let delay = throttle_delay(hint, self.options.retry_delay_ms, attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        hinted = hint.is_some(),
                        "rate limited, waiting before re-running the attempt"
                    );
                    sleep(delay).await;
                    // Rate limiting is flow control, not a failed attempt:
                    // the attempt index deliberately stays where it is.
                    throttle_waits += 1;
                }
                AttemptOutcome::Terminal(status) => {
                    warn!(
                        attempt,
                        status = status.as_u16(),
                        "terminal status, giving up"
                    );
                    return Ok(FetchOutcome::Failure);
                }
                AttemptOutcome::Transient(label) => {
                    if attempt < self.options.max_attempts {
                        let delay = backoff_delay(self.options.retry_delay_ms, attempt);
                        warn!(
                            attempt,
                            max_attempts = self.options.max_attempts,
                            error = label,
                            delay_ms = delay.as_millis() as u64,
                            "attempt failed, backing off"
                        );
                        sleep(delay).await;
                    } else {
                        warn!(attempt, error = label, "attempt failed, budget exhausted");
                    }
                    attempt += 1;
                }
            }
        }

        Ok(FetchOutcome::Failure)
    }

    /// Issues one physical GET and classifies what came back. Reading the
    /// body counts as part of the attempt, so a connection dying mid-body is
    /// a transient failure like any other.
    async fn attempt_get(&self, url: &str, query: &Query) -> AttemptOutcome {
        let response = self
            .http
            .get(url)
            .query(&query.pairs())
            .timeout(Duration::from_millis(self.options.timeout_ms))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => return AttemptOutcome::Transient(transport_label(&err)),
        };

        let status = response.status();
        match classify_status(status) {
            StatusClass::Throttled => AttemptOutcome::Throttled(retry_after(response.headers())),
            StatusClass::Terminal => AttemptOutcome::Terminal(status),
            StatusClass::Success => match response.text().await {
                Ok(body) => AttemptOutcome::Body(body),
                Err(err) => AttemptOutcome::Transient(transport_label(&err)),
            },
        }
    }
}
