//! IONOS challenge solver
//!
//! Adapts the reconciliation protocol to the [`ChallengeSolver`] capability:
//! per request it decodes and validates the issuer configuration, resolves
//! the API token, connects, and runs [`ensure_present`] or
//! [`ensure_absent`].

use async_trait::async_trait;
use dns01_core::config::{AmbientCredentials, IonosConfig};
use dns01_core::{ChallengeOutcome, ChallengeRequest, ChallengeSolver, Error, Result, SecretStore};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::api::{ApiConnector, IonosApi};
use crate::client::HttpConnector;
use crate::protocol::{ensure_absent, ensure_present};

/// Name the host runtime dispatches on
pub const SOLVER_NAME: &str = "ionos";

/// DNS-01 solver for IONOS Cloud DNS
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the solver performs every read (zone lookup,
/// record listing, zone file download) but skips the zone file upload and
/// the record deletion, logging what would have changed.
pub struct IonosSolver {
    connector: Box<dyn ApiConnector>,
    ambient: AmbientCredentials,
    dry_run: bool,
    secrets: OnceLock<Arc<dyn SecretStore>>,
}

impl std::fmt::Debug for IonosSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IonosSolver")
            .field("ambient", &self.ambient)
            .field("dry_run", &self.dry_run)
            .field("initialized", &self.secrets.get().is_some())
            .finish()
    }
}

impl IonosSolver {
    /// Create a solver talking HTTP with the given per-call timeout
    pub fn new(timeout: Duration, ambient: AmbientCredentials, dry_run: bool) -> Self {
        Self::with_connector(Box::new(HttpConnector::new(timeout)), ambient, dry_run)
    }

    /// Create a solver with a custom connector
    pub fn with_connector(
        connector: Box<dyn ApiConnector>,
        ambient: AmbientCredentials,
        dry_run: bool,
    ) -> Self {
        Self {
            connector,
            ambient,
            dry_run,
            secrets: OnceLock::new(),
        }
    }

    /// Decode, validate and connect for one request
    async fn api_for(&self, request: &ChallengeRequest) -> Result<Arc<dyn IonosApi>> {
        let cfg = IonosConfig::from_json(request.config.as_ref())?;
        cfg.validate(request.allow_ambient_credentials)?;

        let token = self.api_token(&cfg, request).await?;
        let endpoint = if request.allow_ambient_credentials {
            cfg.effective_endpoint(&self.ambient)
        } else {
            cfg.endpoint.clone()
        };

        self.connector.connect(&endpoint, &token)
    }

    async fn api_token(&self, cfg: &IonosConfig, request: &ChallengeRequest) -> Result<String> {
        let selector = &cfg.api_token_secret_ref;

        if selector.name.is_empty() {
            // only reachable in ambient mode, validation rejects it otherwise
            return self
                .ambient
                .token
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    Error::credential("no api token secret provided and no ambient token available")
                });
        }

        let secrets = self.secrets.get().ok_or_else(|| {
            Error::config("ionos solver used before initialize() provided a secret store")
        })?;

        secrets
            .get_secret_value(&request.resource_namespace, &selector.name, &selector.key)
            .await
    }
}

#[async_trait]
impl ChallengeSolver for IonosSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn initialize(&self, secrets: Arc<dyn SecretStore>) -> Result<()> {
        if self.secrets.set(secrets).is_err() {
            tracing::warn!("ionos solver initialized more than once; keeping first secret store");
        }
        if self.dry_run {
            tracing::warn!("ionos solver running in DRY-RUN mode - no changes will be made");
        }
        Ok(())
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<ChallengeOutcome> {
        let api = self.api_for(request).await?;
        ensure_present(
            api.as_ref(),
            request.domain(),
            request.subdomain(),
            &request.key,
            self.dry_run,
        )
        .await
    }

    async fn clean_up(&self, request: &ChallengeRequest) -> Result<ChallengeOutcome> {
        let api = self.api_for(request).await?;
        ensure_absent(
            api.as_ref(),
            request.domain(),
            request.subdomain(),
            &request.key,
            self.dry_run,
        )
        .await
    }
}
