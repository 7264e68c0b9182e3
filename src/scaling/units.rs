//! Unit recognition
//!
//! Maps the unit words found in ingredient lines onto one canonical
//! spelling and a measurement category.

use serde::{Deserialize, Serialize};

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup, etc.)
    Volume,
    /// Count/discrete units (each, piece, clove)
    Count,
    /// Loose kitchen measures (pinch, handful) or anything unrecognised
    Custom,
}

/// A recognised unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub canonical: &'static str,
    pub category: UnitCategory,
}

// ============================================================================
// Unit Table
// ============================================================================

const UNIT_TABLE: &[(&str, &[&str], UnitCategory)] = &[
    // Weight
    ("g", &["g", "gram", "grams", "gr"], UnitCategory::Weight),
    ("kg", &["kg", "kilogram", "kilograms", "kilo", "kilos"], UnitCategory::Weight),
    ("mg", &["mg", "milligram", "milligrams"], UnitCategory::Weight),
    ("oz", &["oz", "ounce", "ounces"], UnitCategory::Weight),
    ("lb", &["lb", "lbs", "pound", "pounds"], UnitCategory::Weight),
    // Volume
    ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"], UnitCategory::Volume),
    ("l", &["l", "liter", "liters", "litre", "litres"], UnitCategory::Volume),
    ("tsp", &["tsp", "teaspoon", "teaspoons", "t"], UnitCategory::Volume),
    ("tbsp", &["tbsp", "tbs", "tablespoon", "tablespoons", "T"], UnitCategory::Volume),
    ("fl oz", &["fl oz", "fl. oz", "floz", "fl-oz", "fluid ounce", "fluid ounces"], UnitCategory::Volume),
    ("cup", &["cup", "cups"], UnitCategory::Volume),
    ("pint", &["pint", "pints", "pt"], UnitCategory::Volume),
    ("quart", &["quart", "quarts", "qt"], UnitCategory::Volume),
    ("gallon", &["gallon", "gallons", "gal"], UnitCategory::Volume),
    // Count
    ("each", &["each", "ea"], UnitCategory::Count),
    ("piece", &["piece", "pieces", "pc", "pcs"], UnitCategory::Count),
    ("clove", &["clove", "cloves"], UnitCategory::Count),
    ("can", &["can", "cans", "tin", "tins"], UnitCategory::Count),
    ("slice", &["slice", "slices"], UnitCategory::Count),
    ("unit", &["unit", "units", "count"], UnitCategory::Count),
    ("package", &["package", "packages", "pkg", "packet", "packets"], UnitCategory::Count),
    // Loose measures
    ("pinch", &["pinch", "pinches"], UnitCategory::Custom),
    ("dash", &["dash", "dashes"], UnitCategory::Custom),
    ("handful", &["handful", "handfuls"], UnitCategory::Custom),
    ("bunch", &["bunch", "bunches"], UnitCategory::Custom),
    ("sprig", &["sprig", "sprigs"], UnitCategory::Custom),
];

/// Recognise a unit word ("Tbsp.", "cups", "oz")
///
/// Single-letter "T" (tablespoon) and "t" (teaspoon) are case-sensitive;
/// everything else matches in any case. A trailing `.` or `,` is ignored.
pub fn recognize_unit(word: &str) -> Option<Unit> {
    let cleaned = word.trim().trim_end_matches(|c| c == '.' || c == ',');
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.len() > 1 || cleaned == "T" || cleaned == "t" {
        for &(canonical, aliases, category) in UNIT_TABLE {
            if aliases.contains(&cleaned) {
                return Some(Unit { canonical, category });
            }
        }
    }

    let lower = cleaned.to_lowercase();
    if lower.len() == 1 && lower != "g" && lower != "l" {
        return None;
    }
    UNIT_TABLE
        .iter()
        .find(|(_, aliases, _)| aliases.contains(&lower.as_str()))
        .map(|&(canonical, _, category)| Unit { canonical, category })
}

/// Canonical spelling of a unit, or the lower-cased input if unrecognised
pub fn canonical_unit(unit: &str) -> String {
    match recognize_unit(unit) {
        Some(found) => found.canonical.to_string(),
        None => unit.trim().to_lowercase(),
    }
}

/// Determine the category of a unit string
pub fn categorize_unit(unit: &str) -> UnitCategory {
    recognize_unit(unit)
        .map(|found| found.category)
        .unwrap_or(UnitCategory::Custom)
}
