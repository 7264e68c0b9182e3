//! Inventory module
//!
//! Normalizes the dashboard's loosely typed inventory payload.

pub mod classify;
pub mod normalize;
pub mod raw;

pub use classify::{classify, matching_rule, Candidate, MealRule, MEAL_RULES};
pub use normalize::{
    normalize, normalize_value, Classification, IngredientsByLocation, InventoryItem, Location,
    NormalizedInventory,
};
pub use raw::{RawEntry, RawFreezer, RawInventory, RawQuantity, RawRecord};
