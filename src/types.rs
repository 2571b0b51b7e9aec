use serde::Deserialize;

/// One movie as the search/popular/discover endpoints report it.
///
/// Fields are optional because the upstream API omits or blanks them freely;
/// callers decide what an absent value means for their own output.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    /// Wire name `vote_average`.
    #[serde(default, rename = "vote_average")]
    pub rating: Option<f64>,
}

/// Envelope for endpoints that answer with a `results` array.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}
