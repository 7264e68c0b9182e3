//! Meal vs ingredient classification for fridge entries
//!
//! An entry is a meal when any rule in [`MEAL_RULES`] matches, checked in
//! order. The name-based rules are plain substring tests, so "cornmeal"
//! counts as a meal.

use super::normalize::Classification;
use super::raw::RawEntry;

/// The facts a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub kind: Option<&'a str>,
    pub category: Option<&'a str>,
    pub leftover: bool,
}

impl<'a> Candidate<'a> {
    pub fn new(entry: &'a RawEntry, name: &'a str) -> Self {
        Self {
            name,
            kind: entry.kind(),
            category: entry.category(),
            leftover: entry.leftover(),
        }
    }

    /// Bare-name candidate with no hints
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            kind: None,
            category: None,
            leftover: false,
        }
    }
}

/// A named meal predicate
#[derive(Debug, Clone, Copy)]
pub struct MealRule {
    pub name: &'static str,
    pub matches: fn(&Candidate<'_>) -> bool,
}

/// `type` (or `kind`) is "meal"
fn type_is_meal(c: &Candidate<'_>) -> bool {
    c.kind.is_some_and(|kind| kind.trim().eq_ignore_ascii_case("meal"))
}

/// `leftover: true`, or `category` is "leftover"/"leftovers"
fn flagged_leftover(c: &Candidate<'_>) -> bool {
    c.leftover
        || c.category.is_some_and(|category| {
            let category = category.trim();
            category.eq_ignore_ascii_case("leftover") || category.eq_ignore_ascii_case("leftovers")
        })
}

/// name contains "leftover"
fn name_mentions_leftover(c: &Candidate<'_>) -> bool {
    c.name.to_lowercase().contains("leftover")
}

/// name contains "meal" but not "ingredient"
fn name_mentions_meal(c: &Candidate<'_>) -> bool {
    let lower = c.name.to_lowercase();
    lower.contains("meal") && !lower.contains("ingredient")
}

/// Meal rules in evaluation order
pub const MEAL_RULES: &[MealRule] = &[
    MealRule { name: "type_is_meal", matches: type_is_meal },
    MealRule { name: "flagged_leftover", matches: flagged_leftover },
    MealRule { name: "name_mentions_leftover", matches: name_mentions_leftover },
    MealRule { name: "name_mentions_meal", matches: name_mentions_meal },
];

/// First rule that marks the candidate as a meal
pub fn matching_rule(candidate: &Candidate<'_>) -> Option<&'static MealRule> {
    MEAL_RULES.iter().find(|rule| (rule.matches)(candidate))
}

pub fn classify(candidate: &Candidate<'_>) -> Classification {
    match matching_rule(candidate) {
        Some(_) => Classification::Meal,
        None => Classification::Ingredient,
    }
}
