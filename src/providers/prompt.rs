/// The instruction sent ahead of the page text when asking a model to
/// extract a recipe.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Build the full prompt for one page excerpt.
pub fn build_extraction_prompt(page_text: &str) -> String {
    format!("{RECIPE_EXTRACTION_PROMPT}\nPage text:\n{page_text}")
}
