//! Dashboard API access

pub mod client;

pub use client::{ApiError, ApiResult, DashboardClient};
