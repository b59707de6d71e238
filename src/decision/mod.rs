//! Decision service integration: wire types and the outbound client.

mod client;
mod types;

pub use client::{DecisionClient, DecisionError, HttpDecisionClient};
pub use types::{PolicyQuery, RequestAttributes, Verdict};
