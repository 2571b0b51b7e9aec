use std::collections::HashMap;
use std::fmt;

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Connection and lookup configuration for [`crate::MovieDbClient`].
///
/// Everything a lookup depends on is an explicit field so tests can inject
/// fixtures: the credential, the API root, and the genre-name table. Nothing
/// is read from process-wide state after construction.
#[derive(Clone)]
pub struct MovieDbConfig {
    /// API key sent as the `api_key` query parameter on every request.
    pub api_key: String,
    /// API root joined with endpoint paths. Stored without a trailing slash.
    pub base_url: String,
    /// Lowercase genre name to upstream genre id.
    pub genres: HashMap<String, u32>,
}

impl fmt::Debug for MovieDbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovieDbConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("genres", &self.genres.len())
            .finish()
    }
}

impl MovieDbConfig {
    /// Creates a configuration for the public API with the standard genre
    /// table.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            genres: default_genres(),
        }
    }

    /// Points the client at a different API root (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads:
    /// - `TMDB_API_KEY`: access key (required, non-empty)
    /// - `TMDB_BASE_URL`: optional API root override
    ///
    /// Returns an error if the key is missing or empty.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| "missing TMDB_API_KEY environment variable".to_owned())?;
        if api_key.trim().is_empty() {
            return Err("TMDB_API_KEY is set but empty".to_owned());
        }

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("TMDB_BASE_URL") {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url.trim());
            }
        }
        Ok(config)
    }

    /// Looks up a genre id by name, ignoring case and surrounding blanks.
    pub fn genre_id(&self, name: &str) -> Option<u32> {
        self.genres.get(&name.trim().to_lowercase()).copied()
    }
}

/// The upstream movie-genre table: name (lowercase) to genre id.
fn default_genres() -> HashMap<String, u32> {
    [
        ("action", 28),
        ("adventure", 12),
        ("animation", 16),
        ("comedy", 35),
        ("crime", 80),
        ("documentary", 99),
        ("drama", 18),
        ("family", 10751),
        ("fantasy", 14),
        ("history", 36),
        ("horror", 27),
        ("music", 10402),
        ("mystery", 9648),
        ("romance", 10749),
        ("science fiction", 878),
        ("tv movie", 10770),
        ("thriller", 53),
        ("war", 10752),
        ("western", 37),
    ]
    .into_iter()
    .map(|(name, id)| (name.to_owned(), id))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::MovieDbConfig;

    #[test]
    fn genre_lookup_ignores_case_and_blanks() {
        let config = MovieDbConfig::new("key");
        assert_eq!(config.genre_id("drama"), Some(18));
        assert_eq!(config.genre_id("Drama"), Some(18));
        assert_eq!(config.genre_id("  SCIENCE FICTION  "), Some(878));
        assert_eq!(config.genre_id("polka"), None);
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = MovieDbConfig::new("key").with_base_url("http://127.0.0.1:9000/v3/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v3");
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let config = MovieDbConfig::new("secret-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
