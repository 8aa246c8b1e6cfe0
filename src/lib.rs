pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod model;
pub mod normalize;

use std::time::Duration;

use log::{debug, info};
use scraper::Html;
use url::Url;

pub use crate::config::Settings;
pub use crate::error::ExtractError;
pub use crate::extractors::{SelectorTable, SiteProfile};
pub use crate::fetch::ProxyRoute;
pub use crate::model::{
    Category, Difficulty, Ingredient, Instruction, RecipeDraft, RecipeMetadata,
};

use crate::extractors::{resolve_strategy, ParsingContext};
use crate::fetch::{with_retry, FetchError, ProxyFetcher};

/// Extract a recipe from `url` with the default configuration.
///
/// Convenience wrapper around [`RecipeExtractor::extract`].
pub async fn extract(url: &str) -> Result<RecipeDraft, ExtractError> {
    RecipeExtractor::new().extract(url).await
}

/// The extraction pipeline: strategy dispatch, proxied fetch with retry,
/// parsing, and completeness validation.
///
/// Holds no per-call state; one instance can serve concurrent `extract`
/// calls for different URLs.
pub struct RecipeExtractor {
    fetcher: ProxyFetcher,
    retry_attempts: u32,
    retry_base_delay: Duration,
    sites: Vec<SiteProfile>,
}

impl Default for RecipeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeExtractor {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RecipeExtractorBuilder {
        RecipeExtractorBuilder::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let routes = settings
            .proxies
            .iter()
            .enumerate()
            .map(|(i, template)| ProxyRoute::new(format!("proxy-{}", i + 1), template.clone()))
            .collect();

        Self::builder()
            .proxy_routes(routes)
            .retry_attempts(settings.retry_attempts)
            .retry_base_delay(Duration::from_millis(settings.retry_delay_ms))
            .timeout(Duration::from_secs(settings.timeout))
            .build()
    }

    /// Extract a normalized recipe draft from a recipe-page URL.
    ///
    /// Fails with one of the [`ExtractError`] kinds; a failed call is
    /// terminal and must be re-invoked by the caller if desired.
    pub async fn extract(&self, url: &str) -> Result<RecipeDraft, ExtractError> {
        let target = parse_target(url)?;
        let host = target.host_str().unwrap_or_default().to_string();

        let strategy = resolve_strategy(&host, &self.sites);
        info!("extracting {} with the {} strategy", target, strategy.name());

        let body = with_retry(
            || self.fetcher.fetch(target.as_str()),
            self.retry_attempts,
            self.retry_base_delay,
        )
        .await
        .map_err(classify_fetch_error)?;

        debug!("fetched {} bytes from {}", body.len(), target);
        let context = ParsingContext {
            url: target,
            document: Html::parse_document(&body),
        };

        let draft = strategy.extract(&context)?;

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(ExtractError::IncompleteResult(missing.join(", ")));
        }

        Ok(draft)
    }
}

/// Builder for a customized [`RecipeExtractor`].
///
/// Lets tests point the proxy chain at fake routes and register their own
/// site profiles without touching the network defaults.
#[derive(Debug, Default)]
pub struct RecipeExtractorBuilder {
    routes: Vec<ProxyRoute>,
    retry_attempts: Option<u32>,
    retry_base_delay: Option<Duration>,
    timeout: Option<Duration>,
    sites: Option<Vec<SiteProfile>>,
}

impl RecipeExtractorBuilder {
    /// Replace the proxy route list.
    pub fn proxy_routes(mut self, routes: Vec<ProxyRoute>) -> Self {
        self.routes = routes;
        self
    }

    /// Append a single proxy route; `template` must contain `{url}`.
    pub fn proxy_route(
        mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.routes.push(ProxyRoute::new(name, template));
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts.max(1));
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Per-request ceiling applied to each proxy route attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the built-in site profiles.
    pub fn sites(mut self, sites: Vec<SiteProfile>) -> Self {
        self.sites = Some(sites);
        self
    }

    /// Register an additional site profile ahead of the built-ins.
    pub fn site(mut self, profile: SiteProfile) -> Self {
        let mut sites = self.sites.unwrap_or_else(SiteProfile::builtin);
        sites.insert(0, profile);
        self.sites = Some(sites);
        self
    }

    pub fn build(self) -> RecipeExtractor {
        let routes = if self.routes.is_empty() {
            ProxyRoute::defaults()
        } else {
            self.routes
        };
        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));

        RecipeExtractor {
            fetcher: ProxyFetcher::new(routes, timeout),
            retry_attempts: self.retry_attempts.unwrap_or(3),
            retry_base_delay: self
                .retry_base_delay
                .unwrap_or(Duration::from_millis(2000)),
            sites: self.sites.unwrap_or_else(SiteProfile::builtin),
        }
    }
}

fn parse_target(url: &str) -> Result<Url, ExtractError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidInput("URL is empty".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|err| ExtractError::InvalidInput(format!("{}: {}", trimmed, err)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ExtractError::InvalidInput(format!(
                "unsupported scheme \"{}\"",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ExtractError::InvalidInput(format!("{}: no host", trimmed)));
    }

    Ok(parsed)
}

/// Map a tagged fetch failure onto the error taxonomy. Structural, not a
/// substring match: the fetch layer records why each route failed.
fn classify_fetch_error(err: FetchError) -> ExtractError {
    if err.failures.is_empty() {
        return ExtractError::ExtractionFailed("no proxy routes configured".to_string());
    }
    if err.failures.iter().all(|failure| failure.timed_out()) {
        return ExtractError::Timeout;
    }
    if err.failures.iter().all(|failure| failure.rate_limited()) {
        return ExtractError::RateLimited;
    }
    ExtractError::AllProxiesFailed(err.to_string())
}
