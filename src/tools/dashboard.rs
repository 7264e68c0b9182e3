//! Dashboard pass-through tool
//!
//! Returns the dashboard's own JSON for status, recipes and the shopping
//! list. Inventory goes through `fetch_inventory`, which normalizes it.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::DashboardClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardResource {
    Status,
    Recipes,
    ShoppingList,
}

/// Response for fetch_dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub resource: DashboardResource,
    pub data: Value,
    pub fetched_at: String,
}

pub async fn fetch_dashboard(
    client: Option<&DashboardClient>,
    resource: DashboardResource,
) -> Result<DashboardResponse, String> {
    let client = client.ok_or_else(|| {
        format!(
            "Dashboard API is not configured; set {} to enable fetch_dashboard",
            crate::config::API_URL_VAR
        )
    })?;

    let data = match resource {
        DashboardResource::Status => client.status().await,
        DashboardResource::Recipes => client.recipes().await,
        DashboardResource::ShoppingList => client.shopping_list().await,
    }
    .map_err(|e| format!("Failed to fetch {:?} from dashboard: {}", resource, e))?;

    Ok(DashboardResponse {
        resource,
        data,
        fetched_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    })
}
