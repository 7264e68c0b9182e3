//! Mealplan Tools module
//!
//! MCP tool implementations for the family meal planner.

pub mod dashboard;
pub mod inventory;
pub mod recipes;
pub mod status;
