//! Recipe scaling module
//!
//! Quantity parsing, markdown recipe scaling, unit recognition and
//! ingredient extraction.

pub mod ingredients;
pub mod quantity;
pub mod scaler;
pub mod units;

pub use ingredients::{extract_ingredients, parse_ingredient_line, IngredientEntry};
pub use quantity::{format_quantity, leading_quantity, parse_fraction, parse_quantity, QuantityToken};
pub use scaler::{scale, scale_line, LineRole, Section, SectionTracker};
pub use units::{canonical_unit, categorize_unit, recognize_unit, Unit, UnitCategory};
