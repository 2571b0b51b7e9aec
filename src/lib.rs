//! `moviedb-http` is an async HTTP client for the TMDB movie REST API.
//!
//! The heart of the crate is [`Fetcher`]: an HTTP GET with a bounded attempt
//! budget, linear backoff for transient transport failures, and cooperative
//! handling of 429 rate limiting via the server's `Retry-After` hint.
//! [`MovieDbClient`] layers the movie lookups on top:
//! - [`MovieDbClient::search_movie`]
//! - [`MovieDbClient::popular_movies`]
//! - [`MovieDbClient::discover_by_genre`]

mod client;
mod config;
mod error;
mod fetch;
mod options;
mod query;
mod retry;
mod types;

pub use client::MovieDbClient;
pub use config::{MovieDbConfig, DEFAULT_BASE_URL};
pub use error::MovieDbError;
pub use fetch::{FetchOutcome, Fetcher};
pub use options::FetchOptions;
pub use query::{Query, Scalar};
pub use types::MovieSummary;

pub type Result<T> = std::result::Result<T, MovieDbError>;
