use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a recipe carries no preparation time.
pub const NOT_PROVIDED: &str = "not provided";

/// Label used when the page was scanned but yielded nothing recognizable.
pub const CHECK_SOURCE_PAGE: &str = "check source page";

pub const INGREDIENTS_PLACEHOLDER: &str = "Check the ingredients on the original page";
pub const INSTRUCTIONS_PLACEHOLDER: &str = "See the instructions on the source page";

/// The canonical recipe record produced by every extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub prep_time: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Recipe {
    /// Create a recipe with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        prep_time: impl Into<String>,
        ingredients: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        Recipe {
            name: name.into(),
            prep_time: prep_time.into(),
            ingredients,
            instructions,
            servings: None,
            description: None,
            cuisine: None,
            category: None,
        }
    }

    /// A recipe is usable when it has a name and at least one ingredient or
    /// instruction.
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty()
            && (!self.ingredients.is_empty() || !self.instructions.is_empty())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Prep time: {}", self.prep_time)?;
        if let Some(servings) = &self.servings {
            writeln!(f, "Servings: {servings}")?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "\n{description}")?;
        }

        writeln!(f, "\nIngredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "- {ingredient}")?;
        }

        writeln!(f, "\nInstructions:")?;
        for (i, step) in self.instructions.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, step)?;
        }

        Ok(())
    }
}

/// Trim every entry and drop the ones left empty.
pub(crate) fn clean_entries<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}
