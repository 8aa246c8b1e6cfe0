use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::model::{Ingredient, Instruction, RecipeDraft, RecipeMetadata};
use crate::normalize;

/// Extracts recipes from embedded `application/ld+json` blocks.
///
/// Blocks are scanned in document order; a block that fails to parse is
/// skipped silently (malformed JSON-LD is common noise on recipe sites, not
/// an error). The first element typed `"Recipe"` wins.
pub struct StructuredDataExtractor;

impl StructuredDataExtractor {
    /// Returns `None` when no block carries recipe data; that is a normal
    /// outcome, not a failure.
    pub fn try_extract(&self, document: &Html) -> Option<RecipeDraft> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        for script in document.select(&selector) {
            let raw = script.inner_html();
            let block = match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => value,
                Err(err) => {
                    debug!("skipping malformed JSON-LD block: {}", err);
                    continue;
                }
            };

            if let Some(node) = find_recipe_node(&block) {
                debug!("found Recipe node in JSON-LD block");
                return Some(map_recipe(node));
            }
        }

        None
    }
}

/// Unwrap a possible top-level array and find the first Recipe-typed node.
fn find_recipe_node(block: &Value) -> Option<&Value> {
    match block {
        Value::Array(items) => items.iter().find(|item| is_recipe_type(item)),
        _ if is_recipe_type(block) => Some(block),
        _ => None,
    }
}

fn is_recipe_type(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind.as_str() == Some("Recipe")),
        _ => false,
    }
}

fn map_recipe(node: &Value) -> RecipeDraft {
    let title = node
        .get("name")
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_default();

    let ingredients: Vec<String> = node
        .get("recipeIngredient")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(clean_text)
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let metadata = RecipeMetadata {
        category: category_value(node.get("recipeCategory")),
        prep_time_minutes: text_value(node.get("prepTime"))
            .and_then(|text| normalize::parse_minutes(&text)),
        cook_time_minutes: text_value(node.get("cookTime"))
            .and_then(|text| normalize::parse_minutes(&text)),
        servings: node.get("recipeYield").and_then(count_value),
        difficulty: Default::default(),
        tags: keyword_tags(node.get("keywords")),
    };

    RecipeDraft {
        title,
        image: image_url(node.get("image")),
        ingredients: Ingredient::numbered(ingredients),
        instructions: Instruction::numbered(instruction_texts(node.get("recipeInstructions"))),
        metadata,
    }
}

/// Image may be a plain URL, an ImageObject, or an array of either; the
/// first entry wins.
fn image_url(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let node = match value {
        Value::Array(items) => items.first()?,
        _ => value,
    };

    let url = match node {
        Value::String(url) => url.trim(),
        Value::Object(_) => node.get("url").and_then(Value::as_str).unwrap_or("").trim(),
        _ => "",
    };

    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Instruction entries are strings, or objects carrying `text` or `name`.
fn instruction_texts(value: Option<&Value>) -> Vec<String> {
    let items = match value.and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    items
        .iter()
        .map(|entry| match entry {
            Value::String(step) => step.as_str(),
            _ => entry
                .get("text")
                .and_then(Value::as_str)
                .or_else(|| entry.get("name").and_then(Value::as_str))
                .unwrap_or(""),
        })
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn count_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => normalize::extract_count(text),
        Value::Array(items) => items.first().and_then(count_value),
        _ => None,
    }
}

fn category_value(value: Option<&Value>) -> crate::model::Category {
    let text = match value {
        Some(Value::String(text)) => text.as_str(),
        Some(Value::Array(items)) => items.first().and_then(Value::as_str).unwrap_or(""),
        _ => "",
    };
    normalize::normalize_category(text)
}

/// Keywords may be an array (joined with ", ") or a comma-separated string;
/// either way the result is split into individual tags.
fn keyword_tags(value: Option<&Value>) -> Vec<String> {
    let joined = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    };

    joined
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn clean_text(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}
