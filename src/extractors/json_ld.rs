use super::{Extractor, ParsingContext};
use crate::duration::normalize_duration;
use crate::error::ImportError;
use crate::model::{clean_entries, Recipe, NOT_PROVIDED};
use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

const DEFAULT_NAME: &str = "Recipe without a name";

/// Duration fields in order of preference
const DURATION_FIELDS: [&str; 3] = ["prepTime", "cookTime", "totalTime"];

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    /// Return the first usable `Recipe` record found in the page's JSON-LD
    /// blocks, in document order.
    pub fn extract(&self, html: &str) -> Option<Recipe> {
        let blocks = json_ld_blocks(html);
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", blocks.len());

        for (index, raw_json) in blocks.iter().enumerate() {
            let json_ld = match serde_json::from_str::<Value>(&sanitize_json(raw_json)) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            for record in candidate_records(&json_ld) {
                if !is_recipe_type(record) {
                    continue;
                }

                let recipe = record_to_recipe(record);
                if recipe.is_usable() {
                    debug!("JsonLdExtractor: Found recipe '{}' in block {}", recipe.name, index);
                    return Some(recipe);
                }
                debug!(
                    "JsonLdExtractor: Recipe record in block {} has no ingredients or instructions",
                    index
                );
            }
        }

        None
    }
}

#[async_trait]
impl Extractor for JsonLdExtractor {
    fn name(&self) -> &str {
        "json_ld"
    }

    async fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError> {
        self.extract(&context.content).ok_or_else(|| {
            ImportError::ParseError("No valid recipe found in any JSON-LD script".to_string())
        })
    }
}

fn json_ld_blocks(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    document
        .select(&selector)
        .map(|script| script.text().collect::<String>())
        .collect()
}

/// Records worth testing: the root, array items, and `@graph` members.
fn candidate_records(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(candidate_records).collect(),
        Value::Object(map) => {
            let mut records = vec![value];
            if let Some(graph) = map.get("@graph") {
                records.extend(candidate_records(graph));
            }
            records
        }
        _ => Vec::new(),
    }
}

fn is_recipe_type(record: &Value) -> bool {
    match record.get("@type") {
        Some(Value::String(label)) => is_recipe_label(label),
        Some(Value::Array(labels)) => labels
            .iter()
            .filter_map(Value::as_str)
            .any(is_recipe_label),
        _ => false,
    }
}

/// Accepts "Recipe", "recipe" and "https://schema.org/Recipe".
fn is_recipe_label(label: &str) -> bool {
    let short = label.rsplit(['/', ':']).next().unwrap_or(label);
    short.trim().eq_ignore_ascii_case("recipe")
}

fn record_to_recipe(record: &Value) -> Recipe {
    let name = record
        .get("name")
        .and_then(scalar_text)
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let prep_time = DURATION_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(scalar_text))
        .map(|duration| normalize_duration(&duration))
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    let ingredients = record
        .get("recipeIngredient")
        .or_else(|| record.get("ingredients"))
        .map(ingredient_entries)
        .unwrap_or_default();

    let instructions = record
        .get("recipeInstructions")
        .map(instruction_entries)
        .unwrap_or_default();

    let mut recipe = Recipe::new(name, prep_time, ingredients, instructions);
    recipe.servings = record.get("recipeYield").and_then(yield_text);
    recipe.description = record.get("description").and_then(|description| {
        scalar_text(description).or_else(|| description.get("text").and_then(scalar_text))
    });
    recipe.cuisine = record.get("recipeCuisine").and_then(joined_text);
    recipe.category = record.get("recipeCategory").and_then(joined_text);
    recipe
}

fn ingredient_entries(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => clean_entries(items.iter().map(entry_text)),
        Value::Null => Vec::new(),
        other => clean_entries([entry_text(other)]),
    }
}

fn instruction_entries(value: &Value) -> Vec<String> {
    match value {
        // A single block of text, one step per line
        Value::String(text) => clean_entries(
            decode_html_symbols(text)
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>(),
        ),
        Value::Null => Vec::new(),
        other => clean_entries(instruction_texts(other)),
    }
}

/// Flatten `HowToSection`s and nested step lists into plain step texts.
fn instruction_texts(entry: &Value) -> Vec<String> {
    if let Some(steps) = entry.get("itemListElement") {
        return instruction_texts(steps);
    }

    match entry {
        Value::Array(items) => items.iter().flat_map(instruction_texts).collect(),
        other => vec![entry_text(other)],
    }
}

/// Narrow one list entry to text. Entries are plain strings, objects labelled
/// by `text` (preferred) or `name`, or other scalars that get stringified.
fn entry_text(entry: &Value) -> String {
    let text = match entry {
        Value::String(text) => text.clone(),
        Value::Object(map) => ["text", "name"]
            .iter()
            .find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .filter(|label| !label.trim().is_empty())
            })
            .map(str::to_string)
            .unwrap_or_else(|| entry.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    decode_html_symbols(&text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => decode_html_symbols(text).trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn joined_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        other => scalar_text(other),
    }
}

fn yield_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().filter_map(scalar_text).collect();
            // For arrays, prefer the descriptive version ("4 servings") over just the number
            entries
                .iter()
                .find(|entry| entry.contains(char::is_alphabetic))
                .or_else(|| entries.first())
                .cloned()
        }
        other => scalar_text(other),
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Strip comment and CDATA wrappers some CMSes put around JSON-LD.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim();

    for prefix in ["//<![CDATA[", "<![CDATA[", "<!--"] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.trim_start();
        }
    }
    for suffix in ["//]]>", "]]>", "-->"] {
        if let Some(rest) = cleaned.strip_suffix(suffix) {
            cleaned = rest.trim_end();
        }
    }

    cleaned.to_string()
}
