//! Identity extraction for the gate.
//!
//! Resolves the role claim the policy query is built from. Two sources are
//! supported: a plain request header (the reference behavior - the asserted
//! role is trusted as-is) and a signed bearer token. Extraction is
//! fail-permissive: an absent or invalid claim resolves to the configured
//! default role. It never bypasses the gate; the default role is still
//! evaluated by policy like any other.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{IdentityConfig, IdentitySource};
use crate::error::GateError;

/// Claims expected in a verified role token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleClaims {
    /// Role asserted for the caller.
    pub role: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

#[derive(Clone)]
enum Mode {
    Header { name: String },
    VerifiedToken { decoding_key: DecodingKey },
}

/// Resolves the caller's role from a request.
#[derive(Clone)]
pub struct RoleExtractor {
    mode: Mode,
    default_role: String,
}

impl RoleExtractor {
    /// Build an extractor from configuration.
    ///
    /// Fails at startup when `verified-token` mode is selected without a
    /// secret, rather than silently degrading every caller to the default.
    pub fn new(config: &IdentityConfig) -> Result<Self, GateError> {
        let mode = match config.source {
            IdentitySource::Header => Mode::Header {
                name: config.role_header.clone(),
            },
            IdentitySource::VerifiedToken => {
                if config.token_secret.is_empty() {
                    return Err(GateError::Config(
                        "identity.token_secret is required for the verified-token source"
                            .to_string(),
                    ));
                }
                Mode::VerifiedToken {
                    decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
                }
            }
        };

        Ok(Self {
            mode,
            default_role: config.default_role.clone(),
        })
    }

    /// Resolve the role for one request. Always returns a role.
    pub fn extract(&self, headers: &HeaderMap) -> String {
        match &self.mode {
            Mode::Header { name } => headers
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(String::from)
                .unwrap_or_else(|| self.default_role.clone()),
            Mode::VerifiedToken { decoding_key } => headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .and_then(|token| {
                    let validation = Validation::new(Algorithm::HS256);
                    decode::<RoleClaims>(token, decoding_key, &validation)
                        .map_err(|e| {
                            tracing::debug!(error = %e, "Role token validation failed");
                            e
                        })
                        .ok()
                })
                .map(|data| data.claims.role)
                .unwrap_or_else(|| self.default_role.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn header_config() -> IdentityConfig {
        IdentityConfig::default()
    }

    fn token_config(secret: &str) -> IdentityConfig {
        IdentityConfig {
            source: IdentitySource::VerifiedToken,
            token_secret: secret.to_string(),
            ..IdentityConfig::default()
        }
    }

    fn token_for(role: &str, secret: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 3600;
        let claims = RoleClaims {
            role: role.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_header_role_used_when_present() {
        let extractor = RoleExtractor::new(&header_config()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-user-role", "manager".parse().unwrap());
        assert_eq!(extractor.extract(&headers), "manager");
    }

    #[test]
    fn test_missing_header_defaults_to_guest() {
        let extractor = RoleExtractor::new(&header_config()).unwrap();
        assert_eq!(extractor.extract(&HeaderMap::new()), "guest");
    }

    #[test]
    fn test_empty_header_defaults_to_guest() {
        let extractor = RoleExtractor::new(&header_config()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-user-role", "".parse().unwrap());
        assert_eq!(extractor.extract(&headers), "guest");
    }

    #[test]
    fn test_verified_token_requires_secret() {
        let config = token_config("");
        assert!(matches!(
            RoleExtractor::new(&config),
            Err(GateError::Config(_))
        ));
    }

    #[test]
    fn test_valid_token_role_extracted() {
        let extractor = RoleExtractor::new(&token_config("s3cret")).unwrap();
        let mut headers = HeaderMap::new();
        let token = token_for("manager", "s3cret");
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        assert_eq!(extractor.extract(&headers), "manager");
    }

    #[test]
    fn test_token_signed_with_wrong_secret_defaults() {
        let extractor = RoleExtractor::new(&token_config("s3cret")).unwrap();
        let mut headers = HeaderMap::new();
        let token = token_for("manager", "other-secret");
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        assert_eq!(extractor.extract(&headers), "guest");
    }

    #[test]
    fn test_garbage_token_defaults() {
        let extractor = RoleExtractor::new(&token_config("s3cret")).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer not-a-jwt".parse().unwrap());
        assert_eq!(extractor.extract(&headers), "guest");
    }
}
