//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::gate::{authorize, GateState};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_menu,
        handlers::get_payments,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::MenuResponse,
        crate::api::types::RevenueResponse,
        crate::api::types::HealthResponse,
    )),
    tags(
        (name = "restaurant", description = "Protected restaurant endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "AuthZ Gate API",
        version = "0.1.0",
        description = "Policy-enforcement gateway - every protected request is gated through an external decision service",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router with the gate layered over every protected route.
pub fn build_router(gate: GateState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything business-facing goes behind the gate.
    let protected = Router::new()
        .route("/menu", get(handlers::get_menu))
        .route("/payments", get(handlers::get_payments))
        .layer(middleware::from_fn_with_state(gate, authorize));

    Router::new()
        .merge(protected)
        // Liveness stays reachable when the decision service is down.
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
