//! Error types for DNS-01 challenge solving
//!
//! Every failure a solver can report to its host runtime is one of these
//! variants. None of them are retried internally.

use thiserror::Error;

/// Result type alias for DNS-01 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DNS-01 solvers
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret or secret key could not be resolved
    #[error("Credential error: {0}")]
    Credential(String),

    /// Zero or several zones match a domain
    #[error("Zone lookup failed: {0}")]
    ZoneLookup(String),

    /// The zone exists but the provider has not activated it yet
    #[error("Zone not deployed: {0}")]
    ZoneNotDeployed(String),

    /// The provider returned a zone file without the expected header
    #[error("Retrieved zone file has not the expected format: {0}")]
    ZoneFileFormat(String),

    /// The provider answered with an unexpected HTTP status
    #[error("Error calling API. Status: {status} url: {url} method: {method}")]
    Http {
        /// Full status line, e.g. `404 Not Found`
        status: String,
        /// Target URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// The request never produced a response (DNS, TCP, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No solver registered under the requested name
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a credential error
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    /// Create a zone lookup error
    pub fn zone_lookup(msg: impl Into<String>) -> Self {
        Self::ZoneLookup(msg.into())
    }

    /// Create a "zone not deployed" error
    pub fn zone_not_deployed(msg: impl Into<String>) -> Self {
        Self::ZoneNotDeployed(msg.into())
    }

    /// Create a zone file format error
    pub fn zone_file_format(content: impl Into<String>) -> Self {
        Self::ZoneFileFormat(content.into())
    }

    /// Create an HTTP status error
    pub fn http(
        status: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self::Http {
            status: status.into(),
            url: url.into(),
            method: method.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this error was raised before talking to the provider
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Credential(_) | Self::UnknownSolver(_))
    }
}
