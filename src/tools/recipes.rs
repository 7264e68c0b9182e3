//! Recipe MCP Tools
//!
//! Scaling, browsing and shopping-list tools over the recipe store.

use serde::Serialize;

use crate::recipes::{build_shopping_list as merge_shopping_list, RecipeStore, RecipeSummary, ShoppingItem};
use crate::scaling::{format_quantity, scale, IngredientEntry};

/// Reject factors that would produce meaningless quantities
pub fn validate_factor(factor: f64) -> Result<f64, String> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(format!("factor must be a positive number, got {}", factor));
    }
    Ok(factor)
}

/// Response for scale_recipe_text
#[derive(Debug, Serialize)]
pub struct ScaleTextResponse {
    pub factor: f64,
    pub markdown: String,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
}

/// Full recipe, scaled
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub slug: String,
    pub title: String,
    pub factor: f64,
    pub servings: Option<f64>,
    pub display_servings: Option<String>,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub body: String,
}

/// Response for recipe_ingredients
#[derive(Debug, Serialize)]
pub struct RecipeIngredientsResponse {
    pub slug: String,
    pub title: String,
    pub factor: f64,
    pub ingredients: Vec<IngredientEntry>,
    pub count: usize,
}

/// One recipe pick for a shopping list
#[derive(Debug, Clone)]
pub struct RecipePick {
    pub slug: String,
    pub factor: f64,
}

/// Response for build_shopping_list
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub recipes: Vec<String>,
    pub items: Vec<ShoppingItem>,
    pub count: usize,
}

pub fn scale_recipe_text(markdown: &str, factor: f64) -> Result<ScaleTextResponse, String> {
    let factor = validate_factor(factor)?;
    Ok(ScaleTextResponse {
        factor,
        markdown: scale(markdown, factor),
    })
}

pub fn list_recipes(store: &RecipeStore) -> Result<ListRecipesResponse, String> {
    let recipes = store
        .list()
        .map_err(|e| format!("Failed to list recipes in {}: {}", store.root().display(), e))?;
    Ok(ListRecipesResponse {
        count: recipes.len(),
        recipes,
    })
}

/// Get a recipe with its body and servings scaled
pub fn get_recipe(store: &RecipeStore, slug: &str, factor: f64) -> Result<RecipeDetail, String> {
    let factor = validate_factor(factor)?;
    let recipe = store
        .get(slug)
        .map_err(|e| format!("Failed to get recipe: {}", e))?
        .scaled(factor);

    Ok(RecipeDetail {
        slug: recipe.slug,
        title: recipe.title,
        factor,
        display_servings: recipe.meta.servings.map(format_quantity),
        servings: recipe.meta.servings,
        tags: recipe.meta.tags,
        source: recipe.meta.source,
        prep_time: recipe.meta.prep_time,
        cook_time: recipe.meta.cook_time,
        body: recipe.body,
    })
}

pub fn recipe_ingredients(
    store: &RecipeStore,
    slug: &str,
    factor: f64,
) -> Result<RecipeIngredientsResponse, String> {
    let factor = validate_factor(factor)?;
    let recipe = store
        .get(slug)
        .map_err(|e| format!("Failed to get recipe: {}", e))?;
    let ingredients = recipe.ingredients(factor);

    Ok(RecipeIngredientsResponse {
        slug: recipe.slug,
        title: recipe.title,
        factor,
        count: ingredients.len(),
        ingredients,
    })
}

/// Merge the scaled ingredients of several recipes
pub fn build_shopping_list(store: &RecipeStore, picks: &[RecipePick]) -> Result<ShoppingListResponse, String> {
    if picks.is_empty() {
        return Err("At least one recipe is required".to_string());
    }

    let mut sources = Vec::with_capacity(picks.len());
    for pick in picks {
        let factor = validate_factor(pick.factor)?;
        let recipe = store
            .get(&pick.slug)
            .map_err(|e| format!("Failed to get recipe: {}", e))?;
        sources.push((recipe.title.clone(), recipe.ingredients(factor)));
    }

    let list = merge_shopping_list(&sources);
    tracing::info!(recipes = picks.len(), items = list.len(), "Built shopping list");

    Ok(ShoppingListResponse {
        recipes: sources.into_iter().map(|(title, _)| title).collect(),
        count: list.items.len(),
        items: list.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with_recipes() -> (tempfile::TempDir, RecipeStore) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pancakes.md"),
            "---\ntitle: Pancakes\nservings: 4\n---\n## Ingredients\n- 1 1/2 cups flour\n- 2 eggs\n- Pinch of salt\n\n## Method\n- Cook 2 minutes per side\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("crepes.md"),
            "# Crepes\n\n## Ingredients\n- 1 cup flour\n- 2 eggs\n",
        )
        .unwrap();
        let store = RecipeStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_validate_factor() {
        assert_eq!(validate_factor(1.5), Ok(1.5));
        assert!(validate_factor(0.0).is_err());
        assert!(validate_factor(-2.0).is_err());
        assert!(validate_factor(f64::NAN).is_err());
        assert!(validate_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_scale_recipe_text() {
        let response = scale_recipe_text("## Ingredients\n- 1 cup rice", 3.0).unwrap();
        assert_eq!(response.markdown, "## Ingredients\n- 3 cup rice");
        assert!(scale_recipe_text("x", 0.0).is_err());
    }

    #[test]
    fn test_get_recipe_scaled() {
        let (_dir, store) = store_with_recipes();
        let detail = get_recipe(&store, "pancakes", 1.5).unwrap();
        assert_eq!(detail.title, "Pancakes");
        assert_eq!(detail.servings, Some(6.0));
        assert_eq!(detail.display_servings.as_deref(), Some("6"));
        assert!(detail.body.contains("- 2 1/4 cups flour"));
        assert!(detail.body.contains("- 3 eggs"));
        assert!(detail.body.contains("- Cook 2 minutes per side"));

        assert!(get_recipe(&store, "waffles", 1.0).unwrap_err().contains("not found"));
    }

    #[test]
    fn test_list_and_ingredients() {
        let (_dir, store) = store_with_recipes();
        let listing = list_recipes(&store).unwrap();
        assert_eq!(listing.count, 2);
        assert_eq!(listing.recipes[0].title, "Crepes");

        let ingredients = recipe_ingredients(&store, "pancakes", 2.0).unwrap();
        assert_eq!(ingredients.count, 3);
        assert_eq!(ingredients.ingredients[0].quantity, Some(3.0));
        assert_eq!(ingredients.ingredients[2].quantity, None);
    }

    #[test]
    fn test_build_shopping_list() {
        let (_dir, store) = store_with_recipes();
        let picks = vec![
            RecipePick { slug: "pancakes".into(), factor: 1.0 },
            RecipePick { slug: "crepes".into(), factor: 2.0 },
        ];
        let response = build_shopping_list(&store, &picks).unwrap();
        assert_eq!(response.recipes, vec!["Pancakes", "Crepes"]);

        let flour = response.items.iter().find(|i| i.item == "flour").unwrap();
        assert_eq!(flour.unit.as_deref(), Some("cup"));
        assert_eq!(flour.display_quantity.as_deref(), Some("3 1/2"));

        let eggs = response.items.iter().find(|i| i.item == "eggs").unwrap();
        assert_eq!(eggs.quantity, Some(6.0));

        assert!(build_shopping_list(&store, &[]).is_err());
    }
}
