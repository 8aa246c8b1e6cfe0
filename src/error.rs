use thiserror::Error;

/// Errors that can occur during recipe extraction
///
/// Every failure of [`crate::RecipeExtractor::extract`] is classified into
/// one of these kinds. A failed call is terminal: the extractor never retries
/// with a different strategy on the same call, so callers decide whether to
/// re-invoke based on [`ExtractError::retryable`].
#[derive(Error, Debug)]
pub enum ExtractError {
    /// URL missing, malformed, or not http(s)
    #[error("invalid recipe URL: {0}")]
    InvalidInput(String),

    /// Every configured proxy route failed
    #[error("{0}")]
    AllProxiesFailed(String),

    /// Every fetch attempt exceeded its allotted time
    #[error("the request timed out on every proxy route")]
    Timeout,

    /// The target site is throttling requests
    #[error("the target site is rate limiting requests")]
    RateLimited,

    /// No machine-readable recipe data on a page we have no site handler for
    #[error("no structured recipe data found on this page")]
    NoStructuredData,

    /// No recipe title could be located in the page markup
    #[error("could not find a recipe title on this page")]
    TitleNotFound,

    /// No ingredient lines could be located in the page markup
    #[error("could not find any ingredients on this page")]
    IngredientsNotFound,

    /// No instruction steps could be located in the page markup
    #[error("could not find any instructions on this page")]
    InstructionsNotFound,

    /// A draft was produced but is missing required fields
    #[error("extraction produced an incomplete recipe (missing: {0})")]
    IncompleteResult(String),

    /// Anything that did not match a known failure pattern
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}

impl ExtractError {
    /// Whether re-invoking the same call later could plausibly succeed.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            ExtractError::AllProxiesFailed(_) | ExtractError::Timeout | ExtractError::RateLimited
        )
    }

    /// A short remediation hint suitable for showing to an end user.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ExtractError::InvalidInput(_) => "Check that the URL is a full http(s) address.",
            ExtractError::AllProxiesFailed(_) => {
                "Check your connection and try again in a few minutes."
            }
            ExtractError::Timeout => "The site is slow to respond; try again later.",
            ExtractError::RateLimited => "The site is throttling requests; wait before retrying.",
            ExtractError::NoStructuredData
            | ExtractError::TitleNotFound
            | ExtractError::IngredientsNotFound
            | ExtractError::InstructionsNotFound
            | ExtractError::IncompleteResult(_) => {
                "This page could not be read automatically; enter the recipe manually or try a different URL."
            }
            ExtractError::ExtractionFailed(_) => "Try again; if the problem persists, report the URL.",
        }
    }
}
