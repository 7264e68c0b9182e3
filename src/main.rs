//! Family Meal Planner (mealplan)
//!
//! An MCP server for recipe scaling, shopping lists and kitchen inventory.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use mealplan::api::DashboardClient;
use mealplan::build_info::{self, BuildInfo};
use mealplan::config::Config;
use mealplan::mcp::MealplanService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealplan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Recipes directory: {}", config.recipes_dir.display());
    if !config.recipes_dir.is_dir() {
        tracing::warn!("Recipes directory does not exist: {}", config.recipes_dir.display());
    }

    // A bad dashboard URL disables inventory fetching but not the server
    let client = match config.api_url.as_deref() {
        Some(url) => match DashboardClient::new(url) {
            Ok(client) => {
                eprintln!("Dashboard API: {}", client.base_url());
                Some(client)
            }
            Err(e) => {
                tracing::error!("Dashboard API disabled: {}", e);
                None
            }
        },
        None => {
            eprintln!("Dashboard API: not configured");
            None
        }
    };

    // Create the mealplan service
    let service = MealplanService::new(&config, client);
    tracing::info!("{} ready", BuildInfo::current().label());

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
