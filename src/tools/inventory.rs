//! Inventory MCP Tools

use serde::Serialize;
use serde_json::Value;

use crate::api::DashboardClient;
use crate::inventory::{normalize, NormalizedInventory, RawInventory};

/// Record counts of a normalized inventory
#[derive(Debug, Serialize)]
pub struct InventorySummary {
    pub meals: usize,
    pub fridge_ingredients: usize,
    pub freezer_ingredients: usize,
    pub pantry_ingredients: usize,
    pub total: usize,
}

/// Response for normalize_inventory and fetch_inventory
#[derive(Debug, Serialize)]
pub struct NormalizeInventoryResponse {
    pub summary: InventorySummary,
    pub inventory: NormalizedInventory,
    pub normalized_at: String,
}

fn respond(raw: &RawInventory) -> NormalizeInventoryResponse {
    let inventory = normalize(raw);
    let summary = InventorySummary {
        meals: inventory.meals.len(),
        fridge_ingredients: inventory.ingredients.fridge.len(),
        freezer_ingredients: inventory.ingredients.freezer.len(),
        pantry_ingredients: inventory.ingredients.pantry.len(),
        total: inventory.total_count(),
    };

    if summary.total != raw.record_count() {
        tracing::warn!(
            input = raw.record_count(),
            output = summary.total,
            "Normalized record count differs from input"
        );
    }

    NormalizeInventoryResponse {
        summary,
        inventory,
        normalized_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    }
}

/// Normalize a caller-supplied payload
pub fn normalize_inventory(payload: Value) -> Result<NormalizeInventoryResponse, String> {
    let payload = match payload {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| format!("Inventory is not valid JSON: {}", e))?,
        other => other,
    };
    Ok(respond(&RawInventory::from_value(payload)))
}

/// Fetch the dashboard inventory and normalize it
pub async fn fetch_inventory(client: Option<&DashboardClient>) -> Result<NormalizeInventoryResponse, String> {
    let client = client.ok_or_else(|| {
        format!(
            "Dashboard API is not configured; set {} to enable fetch_inventory",
            crate::config::API_URL_VAR
        )
    })?;

    let payload = client
        .inventory()
        .await
        .map_err(|e| format!("Failed to fetch inventory: {}", e))?;

    Ok(respond(&RawInventory::from_value(payload)))
}
