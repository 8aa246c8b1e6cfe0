use log::debug;

use super::{ExtractionStrategy, ParsingContext, StructuredDataExtractor};
use crate::error::ExtractError;
use crate::model::RecipeDraft;

/// Strategy for hostnames without a site profile.
///
/// Only structured data is consulted; there are no generic markup
/// heuristics, so pages without a Recipe block fail with
/// [`ExtractError::NoStructuredData`].
pub struct GenericStrategy;

impl ExtractionStrategy for GenericStrategy {
    fn name(&self) -> &str {
        "generic"
    }

    fn extract(&self, context: &ParsingContext) -> Result<RecipeDraft, ExtractError> {
        debug!("generic strategy: scanning {} for structured data", context.url);
        StructuredDataExtractor
            .try_extract(&context.document)
            .ok_or(ExtractError::NoStructuredData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use url::Url;

    #[test]
    fn test_no_structured_data_is_an_error() {
        let context = ParsingContext {
            url: Url::parse("https://example.com/some-dish").unwrap(),
            document: Html::parse_document(
                "<html><body><h1>Some Dish</h1><li>1 cup flour</li></body></html>",
            ),
        };

        let err = GenericStrategy.extract(&context).unwrap_err();
        assert!(matches!(err, ExtractError::NoStructuredData));
    }

    #[test]
    fn test_structured_data_succeeds() {
        let html = r#"
            <html><head><script type="application/ld+json">
            {
                "@type": "Recipe",
                "name": "Toast",
                "recipeIngredient": ["bread"],
                "recipeInstructions": ["Toast the bread"]
            }
            </script></head><body></body></html>
        "#;
        let context = ParsingContext {
            url: Url::parse("https://example.com/toast").unwrap(),
            document: Html::parse_document(html),
        };

        let draft = GenericStrategy.extract(&context).unwrap();
        assert_eq!(draft.title, "Toast");
    }
}
