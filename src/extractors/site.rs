use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{ExtractionStrategy, ParsingContext, StructuredDataExtractor};
use crate::error::ExtractError;
use crate::model::{Ingredient, Instruction, RecipeDraft, RecipeMetadata};
use crate::normalize;

/// Markup conventions for one website family.
///
/// Each field holds CSS-selector candidates in priority order. Singular
/// fields take the first matching element; list fields take every match of
/// the first selector that matches anything.
#[derive(Debug, Clone)]
pub struct SelectorTable {
    pub title: Vec<String>,
    pub image: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Vec<String>,
    pub cook_time: Vec<String>,
    pub servings: Vec<String>,
    pub category: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub id: String,
    pub hostnames: Vec<String>,
    pub selectors: SelectorTable,
}

impl SiteProfile {
    /// The allrecipes.com family, covering both the current "mm-recipes"
    /// markup and the older recipe-card layouts still in caches.
    pub fn allrecipes() -> Self {
        SiteProfile {
            id: "allrecipes".to_string(),
            hostnames: vec!["allrecipes.com".to_string()],
            selectors: SelectorTable {
                title: strings(&[
                    "h1.article-heading",
                    "h1.headline.heading-content",
                    "h1.recipe-summary__h1",
                    "h1",
                ]),
                image: strings(&[
                    "div.primary-image__media img",
                    "img.primary-image",
                    "div.lead-media img",
                    "meta[property='og:image']",
                ]),
                ingredients: strings(&[
                    "li.mm-recipes-structured-ingredients__list-item",
                    "ul.mntl-structured-ingredients__list li",
                    "span.ingredients-item-name",
                    "li.checkList__line",
                ]),
                instructions: strings(&[
                    "div.mm-recipes-steps__content ol li",
                    "div.recipe-instructions ol li",
                    "ol.mntl-sc-block-group--OL li",
                    "span.recipe-directions__list--item",
                ]),
                prep_time: strings(&[
                    "div.mm-recipes-details__item--prep-time div.mm-recipes-details__value",
                    "div.recipe-meta-item--prep-time div.recipe-meta-item-body",
                ]),
                cook_time: strings(&[
                    "div.mm-recipes-details__item--cook-time div.mm-recipes-details__value",
                    "div.recipe-meta-item--cook-time div.recipe-meta-item-body",
                ]),
                servings: strings(&[
                    "div.mm-recipes-details__item--servings div.mm-recipes-details__value",
                    "div.recipe-meta-item--servings div.recipe-meta-item-body",
                ]),
                category: strings(&[
                    "a.mntl-breadcrumbs__link",
                    "span.breadcrumbs__title",
                    "a.recipe-breadcrumbs__link",
                ]),
            },
        }
    }

    /// Profiles shipped with the crate; callers may supply their own.
    pub fn builtin() -> Vec<SiteProfile> {
        vec![SiteProfile::allrecipes()]
    }

    pub fn matches_host(&self, host: &str) -> bool {
        self.hostnames
            .iter()
            .any(|name| host == name || host.ends_with(&format!(".{}", name)))
    }
}

/// Extraction tailored to one site profile. Prefers embedded structured
/// data, then falls back to the profile's selector tables.
pub struct SiteStrategy {
    profile: SiteProfile,
}

impl SiteStrategy {
    pub fn new(profile: SiteProfile) -> Self {
        SiteStrategy { profile }
    }

    fn scrape(&self, context: &ParsingContext) -> Result<RecipeDraft, ExtractError> {
        let document = &context.document;
        let table = &self.profile.selectors;

        let title = first_text(document, &table.title).unwrap_or_default();
        if title.is_empty() {
            return Err(ExtractError::TitleNotFound);
        }

        let ingredients = all_texts(document, &table.ingredients);
        if ingredients.is_empty() {
            return Err(ExtractError::IngredientsNotFound);
        }

        let instructions = all_texts(document, &table.instructions);
        if instructions.is_empty() {
            return Err(ExtractError::InstructionsNotFound);
        }

        let image = first_image(document, &table.image)
            .and_then(|src| absolutize(&context.url, &src));

        let category = match first_text(document, &table.category) {
            Some(text) => normalize::normalize_category(&text),
            None => normalize::category_from_path(context.url.path()),
        };

        let metadata = RecipeMetadata {
            category,
            prep_time_minutes: first_text(document, &table.prep_time)
                .and_then(|text| normalize::parse_minutes(&text)),
            cook_time_minutes: first_text(document, &table.cook_time)
                .and_then(|text| normalize::parse_minutes(&text)),
            servings: first_text(document, &table.servings)
                .and_then(|text| normalize::extract_count(&text)),
            difficulty: Default::default(),
            tags: Vec::new(),
        };

        Ok(RecipeDraft {
            title,
            image,
            ingredients: Ingredient::numbered(ingredients),
            instructions: Instruction::numbered(instructions),
            metadata,
        })
    }
}

impl ExtractionStrategy for SiteStrategy {
    fn name(&self) -> &str {
        &self.profile.id
    }

    fn extract(&self, context: &ParsingContext) -> Result<RecipeDraft, ExtractError> {
        if let Some(draft) = StructuredDataExtractor.try_extract(&context.document) {
            debug!("{}: using structured data", self.profile.id);
            return Ok(draft);
        }

        debug!("{}: no structured data, scraping markup", self.profile.id);
        self.scrape(context)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Html, candidates: &[String]) -> Option<String> {
    for selector_str in candidates {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element_text(&element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn all_texts(document: &Html, candidates: &[String]) -> Vec<String> {
    for selector_str in candidates {
        if let Ok(selector) = Selector::parse(selector_str) {
            let texts: Vec<String> = document
                .select(&selector)
                .map(|element| element_text(&element))
                .filter(|text| !text.is_empty())
                .collect();
            if !texts.is_empty() {
                return texts;
            }
        }
    }
    Vec::new()
}

fn first_image(document: &Html, candidates: &[String]) -> Option<String> {
    for selector_str in candidates {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let value = element.value();
                let src = value
                    .attr("src")
                    .or_else(|| value.attr("content"))
                    .or_else(|| value.attr("data-src"))
                    .unwrap_or("")
                    .trim();
                if !src.is_empty() {
                    return Some(src.to_string());
                }
            }
        }
    }
    None
}

fn absolutize(base: &Url, candidate: &str) -> Option<String> {
    base.join(candidate).ok().map(|url| url.to_string())
}
