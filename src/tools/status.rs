//! Mealplan Status Tool
//!
//! Provides runtime status information about the mealplan service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::recipes::RecipeStore;

/// Usage guide for AI assistants
pub const PLANNING_INSTRUCTIONS: &str = r#"
# Mealplan Instructions

## Recipes

Recipes are markdown files. Only bullets under an "Ingredients" heading
(`## Ingredients`, `### Ingredients for the sauce`, ...) are scaled.

- `list_recipes` - every recipe with its slug, title and servings
- `get_recipe(slug, factor)` - full recipe, body scaled by `factor`
- `recipe_ingredients(slug, factor)` - structured ingredient lines
- `scale_recipe_text(markdown, factor)` - scale markdown you already have

To cook for 6 from a recipe that serves 4, use `factor = 1.5`.

## Shopping

`build_shopping_list(recipes: [{slug, factor}, ...])` merges the
ingredients of several recipes. Lines merge when the item and unit match.
Lines without a quantity ("Salt to taste") show no amount.

## Inventory

- `fetch_inventory` - pull the dashboard inventory and normalize it
- `normalize_inventory(inventory)` - normalize a payload you already have

`fetch_dashboard(resource)` returns the dashboard's own JSON for
`status`, `recipes` or `shopping_list`.

Normalized inventory splits into `meals` (ready to eat: leftovers, freezer
backups) and `ingredients` by location (fridge, freezer, pantry). Prefer
planning around meals that are already made.
"#;

#[derive(Debug, Clone, Serialize)]
pub struct MealplanStatus {
    /// Build information
    pub build_number: u64,
    pub build_profile: &'static str,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    /// Recipe store information
    pub recipes_dir: String,
    pub recipes_dir_exists: bool,
    pub recipe_count: Option<usize>,
    /// Dashboard API
    pub api_url: Option<String>,
    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    recipes_dir: PathBuf,
    api_url: Option<String>,
}

impl StatusTracker {
    pub fn new(recipes_dir: PathBuf, api_url: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            recipes_dir,
            api_url,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MealplanStatus {
        let build_info = BuildInfo::current();

        let recipes_dir_exists = self.recipes_dir.is_dir();
        let recipe_count = if recipes_dir_exists {
            RecipeStore::new(&self.recipes_dir).count().ok()
        } else {
            None
        };

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MealplanStatus {
            build_number: build_info.build_number,
            build_profile: build_info.build_profile,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            recipes_dir: self.recipes_dir.display().to_string(),
            recipes_dir_exists,
            recipe_count,
            api_url: self.api_url.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_recipes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("soup.md"), "# Soup\n").unwrap();

        let tracker = StatusTracker::new(dir.path().to_path_buf(), Some("http://localhost:3000".into()));
        let status = tracker.get_status();
        assert!(status.recipes_dir_exists);
        assert_eq!(status.recipe_count, Some(1));
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.api_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_status_missing_dir() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/mealplan"), None);
        let status = tracker.get_status();
        assert!(!status.recipes_dir_exists);
        assert_eq!(status.recipe_count, None);
    }
}
