pub mod shopping;
pub mod store;

pub use shopping::{build_shopping_list, ShoppingItem, ShoppingList};
pub use store::{
    split_front_matter, validate_slug, Recipe, RecipeMeta, RecipeStore, RecipeSummary, StoreError,
    StoreResult,
};
