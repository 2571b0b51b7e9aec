/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum MovieDbError {
    /// Caller-side input problem, rejected before any request is issued.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Genre name missing from the configured genre table.
    #[error("unknown genre '{0}'")]
    UnknownGenre(String),
    /// The upstream API answered successfully but had no matching results.
    #[error("no results: {0}")]
    NotFound(String),
    /// The fetch layer gave up: retry budget exhausted, throttle ceiling
    /// reached, or a terminal HTTP status. The distinction is deliberately
    /// not surfaced; callers report one "try again later" condition.
    #[error("movie service unavailable, try again later")]
    Unavailable,
    /// Response decoding or shape validation error on a successful response.
    #[error("decode error: {0}")]
    Decode(String),
}
