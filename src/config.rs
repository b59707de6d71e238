//! Configuration module for the authorization gate.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Decision service configuration.
///
/// All evaluations share one immutable copy of this; there is no hot-reload.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionConfig {
    /// Endpoint the policy query is POSTed to.
    #[serde(default = "default_decision_url")]
    pub url: String,
    /// Hard deadline for a single outbound call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Additional attempts after a transport failure. Zero preserves the
    /// single-shot behavior.
    #[serde(default)]
    pub max_retries: u32,
    /// Pause between retry attempts, in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// Where the role claim comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentitySource {
    /// Trust a plain request header. Any caller can assert any role; this
    /// matches deployments where a trusted proxy sets the header.
    Header,
    /// Require a signed bearer token carrying the role claim.
    VerifiedToken,
}

/// Identity extraction configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_source")]
    pub source: IdentitySource,
    /// Header carrying the role claim in `header` mode.
    #[serde(default = "default_role_header")]
    pub role_header: String,
    /// Role used when no claim is present. Extraction never bypasses the
    /// gate; the default role is still subject to policy.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// HS256 secret for `verified-token` mode.
    #[serde(default)]
    pub token_secret: String,
}

fn default_decision_url() -> String {
    "http://opa:8181/v1/data/restaurant/authz/allow".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_retry_backoff_ms() -> u64 {
    200
}

fn default_identity_source() -> IdentitySource {
    IdentitySource::Header
}

fn default_role_header() -> String {
    "x-user-role".to_string()
}

fn default_role() -> String {
    "guest".to_string()
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GATE__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with GATE prefix
            .add_source(
                Environment::with_prefix("GATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DecisionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            url: default_decision_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            source: IdentitySource::Header,
            role_header: default_role_header(),
            default_role: default_role(),
            token_secret: String::new(),
        }
    }
}
