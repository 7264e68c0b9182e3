//! Shopping list aggregation across several scaled recipes

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::scaling::{format_quantity, IngredientEntry};

/// One merged shopping list line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub item: String,
    pub unit: Option<String>,
    /// Sum over the entries that had a quantity; `None` means "to taste"
    pub quantity: Option<f64>,
    pub display_quantity: Option<String>,
    /// Recipes this line came from, in first-seen order
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Default)]
struct Accumulator {
    item: String,
    unit: Option<String>,
    quantity: Option<f64>,
    sources: Vec<String>,
    seen: BTreeSet<String>,
}

impl Accumulator {
    fn add(&mut self, source: &str, entry: &IngredientEntry) {
        if let Some(quantity) = entry.quantity {
            self.quantity = Some(self.quantity.unwrap_or(0.0) + quantity);
        }
        if self.seen.insert(source.to_string()) {
            self.sources.push(source.to_string());
        }
    }

    fn finish(self) -> ShoppingItem {
        ShoppingItem {
            display_quantity: self.quantity.map(format_quantity),
            item: self.item,
            unit: self.unit,
            quantity: self.quantity,
            sources: self.sources,
        }
    }
}

/// Merge ingredient entries of several recipes
///
/// Entries merge when their item (case-insensitive) and canonical unit
/// match. Output is sorted by item, then unit.
pub fn build_shopping_list<S: AsRef<str>>(recipes: &[(S, Vec<IngredientEntry>)]) -> ShoppingList {
    let mut merged: BTreeMap<(String, Option<String>), Accumulator> = BTreeMap::new();

    for (source, entries) in recipes {
        for entry in entries {
            let item = entry.item.trim();
            if item.is_empty() {
                continue;
            }
            let key = (item.to_lowercase(), entry.unit.clone());
            merged
                .entry(key)
                .or_insert_with(|| Accumulator {
                    item: item.to_string(),
                    unit: entry.unit.clone(),
                    ..Default::default()
                })
                .add(source.as_ref(), entry);
        }
    }

    ShoppingList {
        items: merged.into_values().map(Accumulator::finish).collect(),
    }
}
