//! Ingredient extraction
//!
//! Turns the bullets of a recipe's Ingredients section into structured
//! entries (quantity, unit, item) for shopping lists.

use serde::Serialize;

use super::quantity::{format_quantity, leading_quantity};
use super::scaler::{split_bullet, LineRole, SectionTracker};
use super::units::{recognize_unit, UnitCategory};

/// One ingredient bullet, already scaled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientEntry {
    /// Bullet text after the marker, with the scaled quantity
    pub text: String,
    pub quantity: Option<f64>,
    pub display_quantity: Option<String>,
    /// Canonical unit, when the word after the quantity is a known unit
    pub unit: Option<String>,
    pub unit_category: Option<UnitCategory>,
    pub item: String,
}

fn word_end(text: &str, start: usize) -> usize {
    text[start..]
        .find(char::is_whitespace)
        .map_or(text.len(), |offset| start + offset)
}

/// Split "cup flour, sifted" into a recognised unit and the remaining text
///
/// Two-word units ("fl oz") are tried before one-word units.
fn split_unit(text: &str) -> (Option<(&'static str, UnitCategory)>, &str) {
    let first_end = word_end(text, 0);
    let second_start = first_end + (text.len() - first_end - text[first_end..].trim_start().len());

    if second_start < text.len() {
        let second_end = word_end(text, second_start);
        let pair = format!("{} {}", &text[..first_end], &text[second_start..second_end]);
        if let Some(unit) = recognize_unit(&pair) {
            return (Some((unit.canonical, unit.category)), text[second_end..].trim_start());
        }
    }

    match recognize_unit(&text[..first_end]) {
        Some(unit) => (Some((unit.canonical, unit.category)), text[first_end..].trim_start()),
        None => (None, text),
    }
}

fn strip_of(text: &str) -> &str {
    match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("of ") => text[3..].trim_start(),
        _ => text,
    }
}

/// Parse one bullet line into an [`IngredientEntry`], scaling its quantity
///
/// Returns `None` for non-bullets and empty bullets. Bullets without a
/// quantity ("- Salt to taste") keep their whole text as the item.
pub fn parse_ingredient_line(line: &str, factor: f64) -> Option<IngredientEntry> {
    let (_, rest) = split_bullet(line)?;
    let rest = rest.trim_end();
    if rest.is_empty() {
        return None;
    }

    let scaled = leading_quantity(rest)
        .and_then(|token| token.value().map(|value| (value * factor, token.len)));

    let Some((quantity, token_len)) = scaled else {
        return Some(IngredientEntry {
            text: rest.to_string(),
            quantity: None,
            display_quantity: None,
            unit: None,
            unit_category: None,
            item: rest.to_string(),
        });
    };

    let display = format_quantity(quantity);
    let remainder = &rest[token_len..];
    let (unit, item) = split_unit(remainder.trim_start());

    Some(IngredientEntry {
        text: format!("{}{}", display, remainder),
        quantity: Some(quantity),
        display_quantity: Some(display),
        unit: unit.map(|(canonical, _)| canonical.to_string()),
        unit_category: unit.map(|(_, category)| category),
        item: strip_of(item).to_string(),
    })
}

/// All ingredient entries of a markdown recipe body, scaled by `factor`
pub fn extract_ingredients(markdown: &str, factor: f64) -> Vec<IngredientEntry> {
    let mut tracker = SectionTracker::new();
    markdown
        .lines()
        .filter(|line| tracker.step(line) == LineRole::IngredientBullet)
        .filter_map(|line| parse_ingredient_line(line, factor))
        .collect()
}
