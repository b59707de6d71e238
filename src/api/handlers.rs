//! Downstream handlers.
//!
//! These are the protected business endpoints the gate sits in front of.
//! They carry no authorization logic of their own; a request only reaches
//! them after the gate obtained an allow verdict.

use axum::Json;

use crate::api::types::{HealthResponse, MenuResponse, RevenueResponse};

/// List the menu.
#[utoipa::path(
    get,
    path = "/menu",
    responses(
        (status = 200, description = "Menu listing", body = MenuResponse),
        (status = 403, description = "Access denied by policy"),
        (status = 500, description = "Authorization check failed")
    ),
    tag = "restaurant"
)]
pub async fn get_menu() -> Json<MenuResponse> {
    Json(MenuResponse {
        starters: vec!["Salad".to_string(), "Soup".to_string()],
        mains: vec!["Burger".to_string(), "Pizza".to_string()],
    })
}

/// Report total revenue.
#[utoipa::path(
    get,
    path = "/payments",
    responses(
        (status = 200, description = "Revenue report", body = RevenueResponse),
        (status = 403, description = "Access denied by policy"),
        (status = 500, description = "Authorization check failed")
    ),
    tag = "restaurant"
)]
pub async fn get_payments() -> Json<RevenueResponse> {
    Json(RevenueResponse {
        total_revenue: 150_000,
        currency: "INR".to_string(),
    })
}

/// Liveness check. Not gated: it reports on this process, not on a
/// protected resource.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
