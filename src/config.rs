//! Runtime configuration from the environment

use std::path::{Path, PathBuf};

pub const RECIPES_DIR_VAR: &str = "MEALPLAN_RECIPES_DIR";
pub const API_URL_VAR: &str = "MEALPLAN_API_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub recipes_dir: PathBuf,
    /// Dashboard base URL; inventory fetching is disabled without it
    pub api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup, so tests need not touch the process env
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipes_dir = lookup(RECIPES_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_recipes_dir(std::env::current_exe().ok().as_deref()));

        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self { recipes_dir, api_url }
    }
}

/// `<project>/data/recipes`, where the project root is found from the
/// executable's location
pub fn default_recipes_dir(exe: Option<&Path>) -> PathBuf {
    let mut path = exe
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("recipes");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(vars(&[
            (RECIPES_DIR_VAR, "/srv/recipes"),
            (API_URL_VAR, " http://pi.local:3000 "),
        ]));
        assert_eq!(config.recipes_dir, PathBuf::from("/srv/recipes"));
        assert_eq!(config.api_url.as_deref(), Some("http://pi.local:3000"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_vars(vars(&[(RECIPES_DIR_VAR, ""), (API_URL_VAR, "  ")]));
        assert!(config.recipes_dir.ends_with("data/recipes"));
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_default_dir_strips_target_profile() {
        let exe = Path::new("/home/me/mealplan/target/release/mealplan");
        assert_eq!(
            default_recipes_dir(Some(exe)),
            PathBuf::from("/home/me/mealplan/data/recipes")
        );

        let installed = Path::new("/opt/mealplan/bin/mealplan");
        assert_eq!(
            default_recipes_dir(Some(installed)),
            PathBuf::from("/opt/mealplan/bin/data/recipes")
        );
    }
}
