use serde::Serialize;

/// A recipe assembled from a single page, before any user edits.
///
/// A draft is only handed back to callers when it is complete: non-empty
/// title, at least one ingredient and at least one instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub metadata: RecipeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub ordinal: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    pub ordinal: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecipeMetadata {
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

/// Canonical recipe categories. Anything we cannot map lands on `Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Beverage,
    Appetizer,
    Side,
    Main,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Dessert => "dessert",
            Category::Snack => "snack",
            Category::Beverage => "beverage",
            Category::Appetizer => "appetizer",
            Category::Side => "side",
            Category::Main => "main",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Main
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl RecipeDraft {
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required fields this draft is still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.ingredients.is_empty() {
            missing.push("ingredients");
        }
        if self.instructions.is_empty() {
            missing.push("instructions");
        }
        missing
    }
}

impl Ingredient {
    /// Number already-cleaned ingredient lines 1, 2, 3... in source order.
    pub fn numbered(texts: impl IntoIterator<Item = String>) -> Vec<Ingredient> {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Ingredient {
                ordinal: i as u32 + 1,
                text,
            })
            .collect()
    }
}

impl Instruction {
    /// Number already-cleaned instruction steps 1, 2, 3... in source order.
    pub fn numbered(texts: impl IntoIterator<Item = String>) -> Vec<Instruction> {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Instruction {
                ordinal: i as u32 + 1,
                text,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, ingredients: Vec<&str>, instructions: Vec<&str>) -> RecipeDraft {
        RecipeDraft {
            title: title.to_string(),
            image: None,
            ingredients: Ingredient::numbered(ingredients.into_iter().map(String::from)),
            instructions: Instruction::numbered(instructions.into_iter().map(String::from)),
            metadata: RecipeMetadata::default(),
        }
    }

    #[test]
    fn test_complete_draft() {
        let d = draft("Pancakes", vec!["1 cup flour"], vec!["Mix and fry"]);
        assert!(d.is_complete());
        assert!(d.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let d = draft("  ", vec![], vec![]);
        assert!(!d.is_complete());
        assert_eq!(
            d.missing_fields(),
            vec!["title", "ingredients", "instructions"]
        );
    }

    #[test]
    fn test_numbered_ordinals_start_at_one() {
        let ingredients =
            Ingredient::numbered(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let ordinals: Vec<u32> = ingredients.iter().map(|i| i.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = RecipeMetadata::default();
        assert_eq!(metadata.category, Category::Main);
        assert_eq!(metadata.difficulty, Difficulty::Medium);
        assert!(metadata.prep_time_minutes.is_none());
        assert!(metadata.tags.is_empty());
    }
}
