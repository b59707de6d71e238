//! Wire types for the decision service exchange.

use serde::{Deserialize, Serialize};

/// Attributes extracted from an inbound request.
///
/// Built fresh per request, never mutated, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAttributes {
    /// Role claim asserted for the caller.
    pub role: String,
    /// Resource being accessed.
    pub path: String,
    /// HTTP verb.
    pub method: String,
}

/// Query POSTed to the decision service: `{"input": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyQuery {
    pub input: PolicyInput,
}

/// The `input` document the policy evaluates.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyInput {
    pub user: UserAttributes,
    pub path: String,
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAttributes {
    pub role: String,
}

impl PolicyQuery {
    pub fn new(attrs: &RequestAttributes) -> Self {
        Self {
            input: PolicyInput {
                user: UserAttributes {
                    role: attrs.role.clone(),
                },
                path: attrs.path.clone(),
                method: attrs.method.clone(),
            },
        }
    }
}

/// Parsed decision service response.
///
/// A missing `result` field deserializes to `false` and is treated as a
/// denial, not a protocol failure: a 2xx JSON response with no `result` is
/// the service answering "no allow rule matched". A body that is not valid
/// JSON at all is a protocol failure.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub result: bool,
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        self.result
    }
}
