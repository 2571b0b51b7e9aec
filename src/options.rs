/// Configures HTTP timeout and retry behavior for the fetcher.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total number of physical attempts per logical call, including the
    /// first one. Transient failures consume attempts; 429 responses do not.
    pub max_attempts: u32,
    /// Base backoff unit in milliseconds. The sleep before attempt `n + 1`
    /// is `retry_delay_ms × n` (linear in the attempt index).
    pub retry_delay_ms: u64,
    /// Ceiling on 429-driven waits per logical call. Rate-limit responses
    /// never consume the attempt budget, so they are bounded separately;
    /// the 429 that would exceed this ceiling ends the call as a failure.
    pub max_throttle_waits: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_delay_ms: 2_000,
            max_throttle_waits: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchOptions;

    #[test]
    fn defaults_match_documented_budget() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout_ms, 10_000);
        assert_eq!(opts.max_attempts, 3);
        assert_eq!(opts.retry_delay_ms, 2_000);
        assert_eq!(opts.max_throttle_waits, 5);
    }
}
