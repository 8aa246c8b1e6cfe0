//! Pure normalization of the messy time, yield and category values found on
//! recipe pages. No I/O; every function is total.

use crate::model::Category;

/// Parse a duration into whole minutes.
///
/// Accepts the restricted ISO-8601 form `PT<N>M` that schema.org recipes
/// almost always use, or free text containing a number ("20 minutes").
/// Anything else is unknown.
pub fn parse_minutes(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_ascii_uppercase();
    if let Some(rest) = upper.strip_prefix("PT") {
        if let Some(digits) = rest.strip_suffix('M') {
            if let Ok(minutes) = digits.parse() {
                return Some(minutes);
            }
        }
    }

    first_digit_run(trimmed)
}

/// First run of digits in the text ("4 servings" -> 4); absent -> unknown.
pub fn extract_count(input: &str) -> Option<u32> {
    first_digit_run(input.trim())
}

/// Map free-form category text onto the canonical set.
///
/// Unmapped input defaults to [`Category::Main`]; this never fails.
pub fn normalize_category(input: &str) -> Category {
    match input.trim().to_lowercase().as_str() {
        "breakfast" | "brunch" => Category::Breakfast,
        "lunch" => Category::Lunch,
        "dinner" | "supper" => Category::Dinner,
        "dessert" | "desserts" | "sweets" => Category::Dessert,
        "snack" | "snacks" => Category::Snack,
        "drink" | "drinks" | "beverage" | "beverages" | "cocktails" => Category::Beverage,
        "appetizer" | "appetizers" | "starter" | "starters" => Category::Appetizer,
        "side" | "sides" | "side dish" | "side dishes" => Category::Side,
        "main" | "mains" | "main course" | "main dish" | "entree" | "entrée" => Category::Main,
        _ => Category::Main,
    }
}

/// Infer a category from URL path segments, checking a fixed keyword list in
/// order and falling back to [`Category::Main`].
pub fn category_from_path(path: &str) -> Category {
    const KEYWORDS: [(&str, Category); 5] = [
        ("breakfast", Category::Breakfast),
        ("lunch", Category::Lunch),
        ("dinner", Category::Dinner),
        ("dessert", Category::Dessert),
        ("snack", Category::Snack),
    ];

    let path = path.to_lowercase();
    for (keyword, category) in KEYWORDS {
        if path.contains(keyword) {
            return category;
        }
    }
    Category::Main
}

fn first_digit_run(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_iso_duration() {
        assert_eq!(parse_minutes("PT15M"), Some(15));
        assert_eq!(parse_minutes("pt30m"), Some(30));
        assert_eq!(parse_minutes("  PT5M  "), Some(5));
    }

    #[test]
    fn test_parse_minutes_free_text() {
        assert_eq!(parse_minutes("20 minutes"), Some(20));
        assert_eq!(parse_minutes("about 45 mins"), Some(45));
        // Hour components fall back to the first digit run
        assert_eq!(parse_minutes("PT1H30M"), Some(1));
    }

    #[test]
    fn test_parse_minutes_unknown() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("   "), None);
        assert_eq!(parse_minutes("a while"), None);
    }

    #[test]
    fn test_extract_count() {
        assert_eq!(extract_count("4 servings"), Some(4));
        assert_eq!(extract_count("Serves 12"), Some(12));
        assert_eq!(extract_count("a few"), None);
        assert_eq!(extract_count(""), None);
    }

    #[test]
    fn test_normalize_category_synonyms() {
        assert_eq!(normalize_category("Main Dish"), Category::Main);
        assert_eq!(normalize_category("main course"), Category::Main);
        assert_eq!(normalize_category("Entree"), Category::Main);
        assert_eq!(normalize_category("Snacks"), Category::Snack);
        assert_eq!(normalize_category("Drinks"), Category::Beverage);
        assert_eq!(normalize_category("desserts"), Category::Dessert);
    }

    #[test]
    fn test_normalize_category_default() {
        assert_eq!(normalize_category("Unknown Thing"), Category::Main);
        assert_eq!(normalize_category(""), Category::Main);
    }

    #[test]
    fn test_category_from_path() {
        assert_eq!(
            category_from_path("/recipes/breakfast/pancakes"),
            Category::Breakfast
        );
        assert_eq!(category_from_path("/dessert/cake-123"), Category::Dessert);
        assert_eq!(category_from_path("/recipes/12345/stir-fry"), Category::Main);
        // First keyword in list order wins
        assert_eq!(
            category_from_path("/breakfast-for-dinner"),
            Category::Breakfast
        );
    }
}
