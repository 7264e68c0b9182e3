//! Mealplan MCP Server Implementation
//!
//! Implements the MCP server with all mealplan tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::DashboardClient;
use crate::config::Config;
use crate::recipes::RecipeStore;
use crate::tools::dashboard::{self, DashboardResource};
use crate::tools::inventory;
use crate::tools::recipes::{self, RecipePick};
use crate::tools::status::StatusTracker;

/// Mealplan MCP Service
#[derive(Clone)]
pub struct MealplanService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: RecipeStore,
    client: Option<DashboardClient>,
    tool_router: ToolRouter<MealplanService>,
}

impl MealplanService {
    pub fn new(config: &Config, client: Option<DashboardClient>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.recipes_dir.clone(),
                config.api_url.clone(),
            ))),
            store: RecipeStore::new(&config.recipes_dir),
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

fn default_factor() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeTextParams {
    /// Recipe markdown
    pub markdown: String,
    /// Multiplier applied to ingredient quantities
    pub factor: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe slug (file name without .md)
    pub slug: String,
    #[serde(default = "default_factor")]
    pub factor: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipePickParams {
    pub slug: String,
    #[serde(default = "default_factor")]
    pub factor: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BuildShoppingListParams {
    /// Recipes to shop for, each with its own scale factor
    pub recipes: Vec<RecipePickParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeInventoryParams {
    /// Inventory payload as JSON (object, or JSON text)
    pub inventory: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FetchDashboardParams {
    /// One of "status", "recipes", "shopping_list"
    pub resource: DashboardResource,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl MealplanService {
    // --- Status ---

    #[tool(description = "Get the current status of the mealplan service including build info, recipe directory, dashboard URL, and process information")]
    async fn mealplan_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for planning meals with these tools. Call this when starting a planning session or when unsure which tool to use.")]
    fn planning_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PLANNING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PLANNING_INSTRUCTIONS)]))
    }

    // --- Recipes ---

    #[tool(description = "Scale the ingredient quantities of recipe markdown by a factor. Only bullets under an Ingredients heading change.")]
    fn scale_recipe_text(&self, Parameters(p): Parameters<ScaleRecipeTextParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::scale_recipe_text(&p.markdown, p.factor).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List all recipes with slug, title, servings and tags")]
    fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.store).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a recipe by slug with its body and servings scaled by an optional factor (default 1)")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.store, &p.slug, p.factor).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the structured ingredient list (quantity, unit, item) of a recipe, scaled by an optional factor")]
    fn recipe_ingredients(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::recipe_ingredients(&self.store, &p.slug, p.factor).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Build a merged shopping list from several recipes, each with its own scale factor")]
    fn build_shopping_list(&self, Parameters(p): Parameters<BuildShoppingListParams>) -> Result<CallToolResult, McpError> {
        let picks: Vec<RecipePick> = p
            .recipes
            .into_iter()
            .map(|r| RecipePick { slug: r.slug, factor: r.factor })
            .collect();
        let result = recipes::build_shopping_list(&self.store, &picks).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Inventory ---

    #[tool(description = "Normalize an inventory payload into ready-to-eat meals and ingredients by location (fridge, freezer, pantry)")]
    fn normalize_inventory(&self, Parameters(p): Parameters<NormalizeInventoryParams>) -> Result<CallToolResult, McpError> {
        let result = inventory::normalize_inventory(p.inventory).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Fetch the current inventory from the meal-planner dashboard and normalize it")]
    async fn fetch_inventory(&self) -> Result<CallToolResult, McpError> {
        let result = inventory::fetch_inventory(self.client.as_ref())
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Fetch the dashboard's own status, recipe list, or shopping list as raw JSON")]
    async fn fetch_dashboard(&self, Parameters(p): Parameters<FetchDashboardParams>) -> Result<CallToolResult, McpError> {
        let result = dashboard::fetch_dashboard(self.client.as_ref(), p.resource)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for MealplanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Family Meal Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Family Meal Planner - recipe scaling, shopping lists and kitchen inventory. \
                 Call planning_instructions first if unsure. \
                 Recipes: list_recipes, get_recipe, recipe_ingredients, scale_recipe_text. \
                 Shopping: build_shopping_list. \
                 Inventory: fetch_inventory, normalize_inventory. \
                 Dashboard: fetch_dashboard (status, recipes, shopping_list). \
                 Status: mealplan_status."
                    .into(),
            ),
        }
    }
}
