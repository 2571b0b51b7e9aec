use tracing::debug;

use crate::fetch::{FetchOutcome, Fetcher};
use crate::types::ResultsPage;
use crate::{FetchOptions, MovieDbConfig, MovieDbError, MovieSummary, Query, Result};

/// How many entries the popular-movies lookup reports at most.
const POPULAR_LIMIT: usize = 5;

/// Client for the movie database HTTP API.
///
/// A thin layer over [`Fetcher`]: each operation validates its input, builds
/// the query parameters, runs one resilient fetch and interprets the tagged
/// outcome. A fetch that gave up surfaces as the single generic
/// [`MovieDbError::Unavailable`] condition, whatever actually went wrong on
/// the wire.
#[derive(Clone, Debug)]
pub struct MovieDbClient {
    fetcher: Fetcher,
    config: MovieDbConfig,
}

impl MovieDbClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use moviedb_http::{MovieDbClient, MovieDbConfig};
    ///
    /// let db = MovieDbClient::new(MovieDbConfig::new("my-api-key"));
    /// ```
    pub fn new(config: MovieDbConfig) -> Self {
        Self {
            fetcher: Fetcher::new(),
            config,
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `TMDB_API_KEY`: access key (required, non-empty)
    /// - `TMDB_BASE_URL`: optional API root override
    ///
    /// Returns an error if the key is missing or empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use moviedb_http::MovieDbClient;
    ///
    /// let db = MovieDbClient::from_env().expect("missing TMDB_API_KEY");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::new(MovieDbConfig::from_env()?))
    }

    /// Applies fetch options such as timeout and retry behavior.
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.fetcher = Fetcher::with_options(options);
        self
    }

    /// Read access to the injected configuration, e.g. to list the genre
    /// names [`discover_by_genre`](Self::discover_by_genre) accepts.
    pub fn config(&self) -> &MovieDbConfig {
        &self.config
    }

    /// Searches for a movie by title and returns the best match.
    ///
    /// Blank titles are rejected before any request is issued. An answer
    /// with no results is [`MovieDbError::NotFound`].
    pub async fn search_movie(&self, title: &str) -> Result<MovieSummary> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MovieDbError::InvalidRequest(
                "movie title is required".to_owned(),
            ));
        }

        let query = Query::new()
            .with("api_key", self.config.api_key.as_str())
            .with("query", title);
        let page = self.fetch_page("/search/movie", &query).await?;

        page.results
            .into_iter()
            .next()
            .ok_or_else(|| MovieDbError::NotFound(format!("no movie matches '{title}'")))
    }

    /// Returns the currently popular movies, at most five of them.
    pub async fn popular_movies(&self) -> Result<Vec<MovieSummary>> {
        let query = Query::new().with("api_key", self.config.api_key.as_str());
        let page = self.fetch_page("/movie/popular", &query).await?;

        if page.results.is_empty() {
            return Err(MovieDbError::NotFound(
                "no popular movies reported".to_owned(),
            ));
        }
        Ok(page.results.into_iter().take(POPULAR_LIMIT).collect())
    }

    /// Lists movies for a named genre, most popular first.
    ///
    /// The name is resolved through the configured genre table without a
    /// network call; unknown names are [`MovieDbError::UnknownGenre`].
    pub async fn discover_by_genre(&self, genre: &str) -> Result<Vec<MovieSummary>> {
        let genre_id = self
            .config
            .genre_id(genre)
            .ok_or_else(|| MovieDbError::UnknownGenre(genre.trim().to_owned()))?;

        let query = Query::new()
            .with("api_key", self.config.api_key.as_str())
            .with("with_genres", genre_id)
            .with("sort_by", "popularity.desc");
        let page = self.fetch_page("/discover/movie", &query).await?;

        if page.results.is_empty() {
            return Err(MovieDbError::NotFound(format!(
                "no movies found for genre '{}'",
                genre.trim()
            )));
        }
        Ok(page.results)
    }

    /// Runs one resilient fetch against an endpoint path and decodes the
    /// `results` envelope out of the returned document.
    async fn fetch_page(&self, path: &str, query: &Query) -> Result<ResultsPage> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "movie api request");

        match self.fetcher.get_json(&url, query).await? {
            FetchOutcome::Success(document) => serde_json::from_value(document)
                .map_err(|err| MovieDbError::Decode(format!("unexpected response shape: {err}"))),
            FetchOutcome::Failure => Err(MovieDbError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MovieDbClient;
    use crate::{MovieDbConfig, MovieDbError};

    fn offline_client() -> MovieDbClient {
        // Reserved TEST-NET-1 address: nothing answers there, and the input
        // checks under test must reject before any request is attempted.
        MovieDbClient::new(
            MovieDbConfig::new("secret-key").with_base_url("http://192.0.2.1:9/v3"),
        )
    }

    #[test]
    fn debug_does_not_leak_the_api_key() {
        let client = offline_client();
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn config_accessor_reflects_the_injected_settings() {
        let client = offline_client();
        assert_eq!(client.config().base_url, "http://192.0.2.1:9/v3");
        assert_eq!(client.config().genre_id("drama"), Some(18));
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_any_request() {
        let client = offline_client();
        let err = client.search_movie("   ").await.unwrap_err();
        assert!(matches!(err, MovieDbError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn unknown_genre_is_rejected_before_any_request() {
        let client = offline_client();
        let err = client.discover_by_genre("polka").await.unwrap_err();
        assert!(matches!(err, MovieDbError::UnknownGenre(name) if name == "polka"));
    }
}
