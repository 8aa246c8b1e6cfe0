use scraper::Html;
use url::Url;

use crate::error::ExtractError;
use crate::model::RecipeDraft;

mod generic;
mod json_ld;
mod site;

pub use self::generic::GenericStrategy;
pub use self::json_ld::StructuredDataExtractor;
pub use self::site::{SelectorTable, SiteProfile, SiteStrategy};

/// Everything a strategy needs from one fetched page.
pub struct ParsingContext {
    pub url: Url,
    pub document: Html,
}

/// One way of turning a page into a recipe draft.
///
/// A strategy is resolved once per URL and holds no state across calls.
pub trait ExtractionStrategy {
    fn name(&self) -> &str;
    fn extract(&self, context: &ParsingContext) -> Result<RecipeDraft, ExtractError>;
}

/// Pick the strategy for a hostname: the site profile that claims the host,
/// or the structured-data-only generic strategy for everything else.
pub fn resolve_strategy(host: &str, sites: &[SiteProfile]) -> Box<dyn ExtractionStrategy> {
    match sites.iter().find(|profile| profile.matches_host(host)) {
        Some(profile) => Box::new(SiteStrategy::new(profile.clone())),
        None => Box::new(GenericStrategy),
    }
}
