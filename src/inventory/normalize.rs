//! Inventory normalization
//!
//! Splits a raw inventory payload into ready-to-eat meals and raw
//! ingredients, one normalized record per input entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::classify::{matching_rule, Candidate};
use super::raw::{RawEntry, RawInventory};

pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_UNIT: &str = "unit";

/// Fields replaced by their normalized counterparts when extras are kept
const NORMALIZED_FIELDS: &[&str] = &["name", "quantity", "unit", "classification", "location"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Meal,
    Ingredient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Fridge,
    Freezer,
    Pantry,
}

/// A normalized inventory record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub classification: Classification,
    pub location: Location,
    /// Original fields carried through (frozen ingredients only)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngredientsByLocation {
    pub fridge: Vec<InventoryItem>,
    pub freezer: Vec<InventoryItem>,
    pub pantry: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedInventory {
    pub meals: Vec<InventoryItem>,
    pub ingredients: IngredientsByLocation,
}

impl NormalizedInventory {
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.fridge.len() + self.ingredients.freezer.len() + self.ingredients.pantry.len()
    }

    /// Number of records across meals and all ingredient locations
    pub fn total_count(&self) -> usize {
        self.meals.len() + self.ingredient_count()
    }
}

fn resolve_name(entry: &RawEntry, name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => entry.fallback_name(),
    }
}

fn item(
    entry: &RawEntry,
    name: String,
    quantity: Option<f64>,
    classification: Classification,
    location: Location,
) -> InventoryItem {
    InventoryItem {
        name,
        quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
        unit: entry.unit().unwrap_or(DEFAULT_UNIT).to_string(),
        classification,
        location,
        extra: Map::new(),
    }
}

fn fridge_item(entry: &RawEntry) -> InventoryItem {
    let name = resolve_name(entry, entry.name());
    let candidate = Candidate::new(entry, &name);
    let (classification, rule) = match matching_rule(&candidate) {
        Some(rule) => (Classification::Meal, Some(rule.name)),
        None => (Classification::Ingredient, None),
    };
    tracing::debug!(name = %name, ?classification, rule, "Classified fridge entry");

    item(entry, name, entry.quantity(), classification, Location::Fridge)
}

fn freezer_backup(entry: &RawEntry) -> InventoryItem {
    let name = resolve_name(entry, entry.meal().or_else(|| entry.name()));
    let quantity = entry.servings().or_else(|| entry.quantity());
    item(entry, name, quantity, Classification::Meal, Location::Freezer)
}

fn freezer_ingredient(entry: &RawEntry) -> InventoryItem {
    let name = resolve_name(entry, entry.name());
    let mut normalized = item(
        entry,
        name,
        entry.quantity(),
        Classification::Ingredient,
        Location::Freezer,
    );
    normalized.extra = entry
        .fields()
        .into_iter()
        .filter(|(key, _)| !NORMALIZED_FIELDS.contains(&key.as_str()))
        .collect();
    normalized
}

fn pantry_item(entry: &RawEntry) -> InventoryItem {
    let name = resolve_name(entry, entry.name());
    item(entry, name, entry.quantity(), Classification::Ingredient, Location::Pantry)
}

/// Normalize a raw inventory
///
/// - fridge entries are classified by [`MEAL_RULES`](super::classify::MEAL_RULES)
/// - freezer backups are always meals, named by their `meal` field
/// - frozen ingredients are always ingredients and keep their other fields
/// - pantry and spice rack entries are pantry ingredients
///
/// Every input entry yields exactly one output record.
pub fn normalize(raw: &RawInventory) -> NormalizedInventory {
    let mut result = NormalizedInventory::default();

    for entry in &raw.fridge {
        let normalized = fridge_item(entry);
        match normalized.classification {
            Classification::Meal => result.meals.push(normalized),
            Classification::Ingredient => result.ingredients.fridge.push(normalized),
        }
    }

    result.meals.extend(raw.freezer.backups.iter().map(freezer_backup));
    result.ingredients.freezer = raw.freezer.ingredients.iter().map(freezer_ingredient).collect();
    result.ingredients.pantry = raw
        .pantry
        .iter()
        .chain(raw.spice_rack.iter())
        .map(pantry_item)
        .collect();

    tracing::debug!(
        records = raw.record_count(),
        meals = result.meals.len(),
        ingredients = result.ingredient_count(),
        "Normalized inventory"
    );

    result
}

/// Normalize any JSON value (wrapped or bare payload)
pub fn normalize_value(value: Value) -> NormalizedInventory {
    normalize(&RawInventory::from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "inventory": {
                "fridge": [
                    "leftover lasagna",
                    "oatmeal",
                    "milk",
                    {"name": "chicken thighs", "quantity": 6, "unit": "pieces"},
                    {"name": "soup", "type": "meal", "quantity": 2},
                    {"name": "rice", "category": "leftovers"},
                    {"name": "meal ingredient kit"}
                ],
                "freezer": {
                    "backups": [
                        {"meal": "Beef stew", "servings": 4},
                        {"meal": "peas"},
                        "Chili"
                    ],
                    "ingredients": [
                        {"name": "frozen meal prep", "quantity": 3, "bag": "zip", "added": "2026-01-02"},
                        "spinach"
                    ]
                },
                "pantry": ["rice", {"name": "flour", "quantity": "2", "unit": "kg"}],
                "spice_rack": ["cumin"]
            }
        })
    }

    #[test]
    fn test_no_record_dropped() {
        let value = sample();
        let raw = RawInventory::from_value(value.clone());
        let normalized = normalize_value(value);
        assert_eq!(raw.record_count(), 15);
        assert_eq!(normalized.total_count(), raw.record_count());
    }

    #[test]
    fn test_fridge_classification() {
        let normalized = normalize_value(sample());
        let meal_names: Vec<&str> = normalized.meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            meal_names,
            vec!["leftover lasagna", "oatmeal", "soup", "rice", "Beef stew", "peas", "Chili"]
        );

        let lasagna = &normalized.meals[0];
        assert_eq!(lasagna.location, Location::Fridge);
        assert_eq!(lasagna.classification, Classification::Meal);
        assert_eq!(lasagna.quantity, 1.0);
        assert_eq!(lasagna.unit, "unit");

        let fridge: Vec<&str> = normalized.ingredients.fridge.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(fridge, vec!["milk", "chicken thighs", "meal ingredient kit"]);
        assert_eq!(normalized.ingredients.fridge[1].quantity, 6.0);
        assert_eq!(normalized.ingredients.fridge[1].unit, "pieces");
    }

    #[test]
    fn test_freezer_buckets_ignore_names() {
        let normalized = normalize_value(sample());

        let stew = normalized.meals.iter().find(|m| m.name == "Beef stew").unwrap();
        assert_eq!(stew.location, Location::Freezer);
        assert_eq!(stew.quantity, 4.0);

        let peas = normalized.meals.iter().find(|m| m.name == "peas").unwrap();
        assert_eq!(peas.classification, Classification::Meal);
        assert_eq!(peas.quantity, 1.0);

        let frozen = &normalized.ingredients.freezer;
        assert_eq!(frozen.len(), 2);
        assert!(frozen.iter().all(|i| i.classification == Classification::Ingredient));
        assert!(frozen.iter().all(|i| i.location == Location::Freezer));
        assert_eq!(frozen[0].name, "frozen meal prep");
        assert_eq!(frozen[0].extra.get("bag"), Some(&json!("zip")));
        assert_eq!(frozen[0].extra.get("added"), Some(&json!("2026-01-02")));
        assert!(!frozen[0].extra.contains_key("name"));
    }

    #[test]
    fn test_frozen_ingredient_keeps_freezer_tags() {
        let normalized = normalize_value(json!({
            "freezer": {"ingredients": [
                {"name": "peas", "location": "chest freezer", "classification": "meal", "bag": "zip"}
            ]}
        }));
        let value = serde_json::to_value(&normalized).unwrap();
        let peas = &value["ingredients"]["freezer"][0];
        assert_eq!(peas["location"], json!("freezer"));
        assert_eq!(peas["classification"], json!("ingredient"));
        assert_eq!(peas["bag"], json!("zip"));
        assert_eq!(value["meals"], json!([]));
    }

    #[test]
    fn test_mistyped_fridge_records_keep_meal_markers() {
        let normalized = normalize_value(json!({
            "fridge": [
                {"name": "beef stew", "type": "meal", "unit": 5},
                {"name": "rice", "leftover": 1},
                {"name": "carrots", "leftover": "no", "quantity": [3]}
            ]
        }));
        let meals: Vec<&str> = normalized.meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(meals, vec!["beef stew", "rice"]);
        assert_eq!(normalized.meals[0].unit, "unit");

        let fridge: Vec<&str> = normalized.ingredients.fridge.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(fridge, vec!["carrots"]);
        assert_eq!(normalized.ingredients.fridge[0].quantity, 1.0);
    }

    #[test]
    fn test_pantry_and_spice_rack_merge() {
        let normalized = normalize_value(sample());
        let pantry = &normalized.ingredients.pantry;
        let names: Vec<&str> = pantry.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["rice", "flour", "cumin"]);
        assert_eq!(pantry[1].quantity, 2.0);
        assert_eq!(pantry[1].unit, "kg");
        assert!(pantry.iter().all(|i| i.location == Location::Pantry));
    }

    #[test]
    fn test_missing_buckets_are_empty() {
        let normalized = normalize_value(json!({"fridge": ["milk"]}));
        assert_eq!(normalized.meals.len(), 0);
        assert_eq!(normalized.ingredients.fridge.len(), 1);
        assert!(normalized.ingredients.freezer.is_empty());
        assert!(normalized.ingredients.pantry.is_empty());

        let empty = normalize_value(json!({}));
        assert_eq!(empty.total_count(), 0);
    }

    #[test]
    fn test_odd_entries_still_counted() {
        let normalized = normalize_value(json!({"pantry": [null, 7, {"quantity": 2}, ""]}));
        let names: Vec<&str> = normalized.ingredients.pantry.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Unnamed item", "7", "Unnamed item", "Unnamed item"]);
        assert_eq!(normalized.ingredients.pantry[2].quantity, 2.0);
    }

    #[test]
    fn test_serialized_shape() {
        let normalized = normalize_value(json!({"fridge": ["leftover pie"], "pantry": ["salt"]}));
        let value = serde_json::to_value(&normalized).unwrap();
        assert_eq!(value["meals"][0]["classification"], json!("meal"));
        assert_eq!(value["meals"][0]["location"], json!("fridge"));
        assert_eq!(value["ingredients"]["pantry"][0]["unit"], json!("unit"));
        assert_eq!(value["ingredients"]["freezer"], json!([]));
    }
}
