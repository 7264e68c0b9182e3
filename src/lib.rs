//! Family Meal Planner (mealplan) Library
//!
//! Recipe scaling, shopping lists and kitchen inventory normalization.

pub mod api;
pub mod build_info;
pub mod config;
pub mod inventory;
pub mod mcp;
pub mod recipes;
pub mod scaling;
pub mod tools;
