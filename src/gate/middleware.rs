//! The authorization gate middleware.
//!
//! Every request to a protected route passes through `authorize`: the
//! request attributes become a policy query, the decision service answers
//! under the configured deadline, and exactly one of three outcomes
//! follows - forward to the inner handler, a 403 denial, or an opaque 500
//! when no verdict could be obtained. Absence of a decision is never
//! treated as allow.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::decision::{DecisionClient, DecisionError, PolicyQuery, RequestAttributes};
use crate::error::GateError;
use crate::identity::RoleExtractor;

/// Shared state for the gate. Immutable after startup; safe to clone into
/// every concurrent evaluation.
#[derive(Clone)]
pub struct GateState {
    pub client: Arc<dyn DecisionClient>,
    pub extractor: RoleExtractor,
}

impl GateState {
    pub fn new(client: Arc<dyn DecisionClient>, extractor: RoleExtractor) -> Self {
        Self { client, extractor }
    }
}

/// Gate one request through a remote policy decision.
pub async fn authorize(
    State(gate): State<GateState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, GateError> {
    let trace_id = Uuid::new_v4();

    let attrs = RequestAttributes {
        role: gate.extractor.extract(request.headers()),
        path: request.uri().path().to_string(),
        method: request.method().to_string(),
    };
    let query = PolicyQuery::new(&attrs);

    tracing::debug!(
        %trace_id,
        role = %attrs.role,
        path = %attrs.path,
        method = %attrs.method,
        "Dispatching policy query"
    );

    match gate.client.decide(&query).await {
        Ok(verdict) if verdict.is_allowed() => {
            tracing::info!(
                %trace_id,
                role = %attrs.role,
                path = %attrs.path,
                method = %attrs.method,
                decision = "allow",
                "Policy decision"
            );
            Ok(next.run(request).await)
        }
        Ok(_) => {
            tracing::info!(
                %trace_id,
                role = %attrs.role,
                path = %attrs.path,
                method = %attrs.method,
                decision = "deny",
                "Policy decision"
            );
            Err(GateError::Denied)
        }
        Err(e) => {
            // Upstream detail goes to the operator log only; the client
            // response stays opaque.
            match &e {
                DecisionError::UpstreamStatus { status, body } => tracing::error!(
                    %trace_id,
                    role = %attrs.role,
                    path = %attrs.path,
                    upstream_status = status,
                    upstream_body = %body,
                    "Decision service protocol failure"
                ),
                _ => tracing::error!(
                    %trace_id,
                    role = %attrs.role,
                    path = %attrs.path,
                    error = %e,
                    "Decision service unreachable"
                ),
            }
            Err(GateError::Decision(e))
        }
    }
}
