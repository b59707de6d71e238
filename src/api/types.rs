//! API response types for the protected stub endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Menu listing payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub starters: Vec<String>,
    pub mains: Vec<String>,
}

/// Revenue report payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    pub total_revenue: u64,
    pub currency: String,
}

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
