//! Meal-planner dashboard HTTP client
//!
//! Read-only access to the dashboard's JSON API. Response bodies are
//! returned as `serde_json::Value`; their shape is owned by the dashboard.

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

const USER_AGENT: &str = concat!("mealplan/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 15;

pub const STATUS_PATH: &str = "api/status";
pub const RECIPES_PATH: &str = "api/recipes";
pub const INVENTORY_PATH: &str = "api/inventory";
pub const SHOPPING_LIST_PATH: &str = "api/shopping-list";

/// Dashboard API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dashboard returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid dashboard URL '{0}'")]
    BadUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for the dashboard API
#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: Url,
    http: reqwest::Client,
}

/// Parse a base URL, keeping any path prefix and forcing a trailing slash
fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|_| ApiError::BadUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ApiError::BadUrl(raw.to_string())),
    }
}

impl DashboardClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path relative to the base
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::BadUrl(format!("{}{}", self.base_url, path)))
    }

    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "Querying dashboard API");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), path, "Dashboard request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    pub async fn status(&self) -> ApiResult<Value> {
        self.get_json(STATUS_PATH).await
    }

    pub async fn recipes(&self) -> ApiResult<Value> {
        self.get_json(RECIPES_PATH).await
    }

    pub async fn inventory(&self) -> ApiResult<Value> {
        self.get_json(INVENTORY_PATH).await
    }

    pub async fn shopping_list(&self) -> ApiResult<Value> {
        self.get_json(SHOPPING_LIST_PATH).await
    }
}
