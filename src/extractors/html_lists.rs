use super::{Extractor, ParsingContext};
use crate::error::ImportError;
use crate::model::{
    Recipe, CHECK_SOURCE_PAGE, INGREDIENTS_PLACEHOLDER, INSTRUCTIONS_PLACEHOLDER, NOT_PROVIDED,
};
use async_trait::async_trait;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const MAX_NAME_CHARS: usize = 100;
const MAX_ITEMS: usize = 10;
const MIN_INSTRUCTION_ITEMS: usize = 3;

/// Last-resort extractor that reads headings and `<ul>`/`<ol>` lists.
///
/// It never fails: when nothing recipe-like is found it returns placeholder
/// entries pointing the user back to the source page.
pub struct HtmlListExtractor;

impl HtmlListExtractor {
    pub fn extract(&self, html: &str, url: &str) -> Recipe {
        debug!("Attempting to extract recipe from headings and lists");
        let document = Html::parse_document(html);

        let name = page_heading(&document).unwrap_or_else(|| name_from_url(url));
        let name = truncate_chars(&name, MAX_NAME_CHARS);

        let lists = list_blocks(&document);
        let ingredients = find_ingredients(&lists);
        let instructions = find_instructions(&lists);

        debug!("Recipe name: {}", name);
        debug!("Ingredients count: {}", ingredients.len());
        debug!("Instructions count: {}", instructions.len());

        if ingredients.is_empty() && instructions.is_empty() {
            return Recipe::new(
                name,
                CHECK_SOURCE_PAGE,
                vec![INGREDIENTS_PLACEHOLDER.to_string()],
                vec![INSTRUCTIONS_PLACEHOLDER.to_string()],
            );
        }

        Recipe::new(name, NOT_PROVIDED, ingredients, instructions)
    }
}

#[async_trait]
impl Extractor for HtmlListExtractor {
    fn name(&self) -> &str {
        "html_lists"
    }

    async fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError> {
        Ok(self.extract(&context.content, &context.url))
    }
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty `<h1>`, then `<title>`.
fn page_heading(document: &Html) -> Option<String> {
    ["h1", "title"].iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        document
            .select(&selector)
            .map(|element| element_text(&element))
            .find(|text| !text.is_empty())
    })
}

/// Build a readable name from the URL, e.g. `/recipes/lemon-drizzle_cake.html`
/// becomes "Lemon Drizzle Cake".
fn name_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "Untitled recipe".to_string();
    };

    let from_path = parsed
        .path_segments()
        .and_then(|segments| {
            segments
                .filter(|segment| segment.contains(char::is_alphabetic))
                .last()
        })
        .map(|segment| {
            let stem = match segment.rsplit_once('.') {
                Some((stem, ext)) if !stem.is_empty() && ext.len() <= 5 => stem,
                _ => segment,
            };
            stem.split(['-', '_'])
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|name| !name.is_empty());

    from_path.unwrap_or_else(|| match parsed.host_str() {
        Some(host) => format!("Recipe from {host}"),
        None => "Untitled recipe".to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect::<String>().trim_end().to_string()
}

/// Text of each list's direct `<li>` children, one vector per list, in
/// document order.
fn list_blocks(document: &Html) -> Vec<Vec<String>> {
    let selector = Selector::parse("ul, ol").unwrap();

    document
        .select(&selector)
        .map(|list| {
            list.children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .map(|item| element_text(&item))
                .collect()
        })
        .collect()
}

fn is_ingredient_line(text: &str) -> bool {
    let len = text.chars().count();
    len > 5 && len < 100
}

fn is_instruction_line(text: &str) -> bool {
    let len = text.chars().count();
    len > 10 && len < 300
}

fn find_ingredients(lists: &[Vec<String>]) -> Vec<String> {
    lists
        .iter()
        .find(|items| items.iter().any(|item| is_ingredient_line(item)))
        .map(|items| {
            items
                .iter()
                .filter(|item| is_ingredient_line(item))
                .take(MAX_ITEMS)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn find_instructions(lists: &[Vec<String>]) -> Vec<String> {
    lists
        .iter()
        .find(|items| {
            let qualifying = items.iter().filter(|item| is_instruction_line(item)).count();
            qualifying >= MIN_INSTRUCTION_ITEMS && qualifying * 2 > items.len()
        })
        .map(|items| {
            items
                .iter()
                .filter(|item| is_instruction_line(item))
                .take(MAX_ITEMS)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
