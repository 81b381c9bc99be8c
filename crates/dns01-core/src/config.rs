//! Configuration types for DNS-01 solvers
//!
//! Two layers of configuration exist:
//!
//! - [`SolverSettings`]: process-wide settings, built once at startup and
//!   handed to solver factories.
//! - [`IonosConfig`]: per-issuer payload carried inside each
//!   [`ChallengeRequest`](crate::ChallengeRequest), decoded and validated
//!   at the start of every call.

use serde::{Deserialize, Serialize};

/// Default IONOS Cloud DNS endpoint, used when ambient credentials are
/// allowed and nothing else names one
pub const DEFAULT_IONOS_ENDPOINT: &str = "https://dns.de-fra.ionos.com";

/// Process-wide solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Timeout applied to every outbound provider call (in seconds)
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Perform reads but skip zone file uploads and record deletions
    #[serde(default)]
    pub dry_run: bool,

    /// Credentials captured from the process environment at startup
    #[serde(default)]
    pub ambient: AmbientCredentials,
}

impl SolverSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
            dry_run: false,
            ambient: AmbientCredentials::default(),
        }
    }

    /// Set the HTTP timeout
    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the ambient credentials
    pub fn with_ambient(mut self, ambient: AmbientCredentials) -> Self {
        self.ambient = ambient;
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.http_timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Endpoint and token taken from the environment instead of issuer config
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AmbientCredentials {
    /// API endpoint
    pub endpoint: Option<String>,
    /// API token
    /// ⚠️ NEVER log this value
    pub token: Option<String>,
}

impl std::fmt::Debug for AmbientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientCredentials")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Reference to one key inside a namespaced secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    /// Secret name
    #[serde(default)]
    pub name: String,
    /// Key within the secret
    #[serde(default)]
    pub key: String,
}

impl SecretKeySelector {
    /// Create a new selector
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Per-issuer configuration for the IONOS solver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IonosConfig {
    /// IONOS Cloud DNS API base URL
    #[serde(default)]
    pub endpoint: String,

    /// Where to find the API token
    #[serde(default)]
    pub api_token_secret_ref: SecretKeySelector,
}

/// A named predicate every non-ambient [`IonosConfig`] must satisfy
type ConfigRule = (fn(&IonosConfig) -> bool, &'static str);

const IONOS_CONFIG_RULES: &[ConfigRule] = &[
    (has_endpoint, "no endpoint provided in ionos config"),
    (has_token_secret, "no api token secret provided in ionos config"),
];

fn has_endpoint(cfg: &IonosConfig) -> bool {
    !cfg.endpoint.is_empty()
}

fn has_token_secret(cfg: &IonosConfig) -> bool {
    !cfg.api_token_secret_ref.name.is_empty()
}

impl IonosConfig {
    /// Decode the configuration payload of a challenge request
    ///
    /// A missing payload yields the default (empty) configuration, which
    /// only passes validation in ambient mode.
    pub fn from_json(payload: Option<&serde_json::Value>) -> Result<Self, crate::Error> {
        match payload {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| crate::Error::config(format!("error decoding ionos config: {}", e))),
        }
    }

    /// Validate the configuration
    ///
    /// With ambient credentials allowed, missing values are filled in from
    /// [`AmbientCredentials`] later and nothing is checked here.
    pub fn validate(&self, allow_ambient_credentials: bool) -> Result<(), crate::Error> {
        if allow_ambient_credentials {
            return Ok(());
        }
        for (holds, message) in IONOS_CONFIG_RULES {
            if !holds(self) {
                return Err(crate::Error::config(*message));
            }
        }
        Ok(())
    }

    /// Endpoint to use, falling back to ambient settings and then the default
    pub fn effective_endpoint(&self, ambient: &AmbientCredentials) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        ambient
            .endpoint
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_IONOS_ENDPOINT.to_string())
    }
}
