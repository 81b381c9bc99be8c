// # Challenge Solver Trait
//
// The capability a host runtime dispatches DNS-01 challenges to.
//
// ## Implementations
//
// - IONOS Cloud DNS: `dns01-provider-ionos` crate
//
// ## Usage
//
// ```rust,ignore
// use dns01_core::{ChallengeRequest, ChallengeSolver};
//
// let solver = /* ChallengeSolver implementation */;
// solver.initialize(secrets).await?;
//
// let request = ChallengeRequest::new("example.com.", "_acme-challenge.example.com.", "token");
// solver.present(&request).await?;
// // ... ACME server validates ...
// solver.clean_up(&request).await?;
// ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::challenge::ChallengeRequest;
use crate::traits::SecretStore;

/// Result of a Present or CleanUp call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// The record was written
    Created {
        /// Whether a follow-up listing already shows the record
        confirmed: bool,
    },
    /// A record with the same name and value already existed (no-op)
    AlreadyPresent {
        /// Provider id of the existing record
        record_id: String,
    },
    /// The zone file already carried the record line, nothing was uploaded
    AlreadyWritten {
        /// Whether the structured listing shows the record yet
        confirmed: bool,
    },
    /// The matching record was deleted
    Deleted {
        /// Provider id of the deleted record
        record_id: String,
    },
    /// No matching record existed (no-op)
    AlreadyAbsent,
    /// Dry-run: the change that would have been made
    Skipped {
        /// Human-readable description of the skipped write
        action: String,
    },
}

impl ChallengeOutcome {
    /// Whether the provider state was modified
    pub fn changed(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Deleted { .. })
    }
}

/// Trait for DNS-01 solver implementations
///
/// # Idempotency
///
/// [`present`](Self::present) and [`clean_up`](Self::clean_up) must
/// tolerate being called repeatedly with the same request and converge to
/// the same provider state. CleanUp must only remove the record whose value
/// equals the request's key, so that several validations for the same name
/// can run side by side.
///
/// # Statelessness
///
/// Solvers hold no state between calls besides what `initialize` set up.
/// Zone and record state is re-read from the provider on every call. Retries
/// belong to the host runtime.
#[async_trait]
pub trait ChallengeSolver: Send + Sync {
    /// Solver name the host runtime dispatches on (e.g. "ionos")
    fn name(&self) -> &'static str;

    /// Called once before the first challenge
    ///
    /// Solvers keep the secret store to resolve credentials referenced by
    /// issuer configuration.
    async fn initialize(&self, secrets: Arc<dyn SecretStore>) -> Result<(), crate::Error>;

    /// Ensure the challenge TXT record exists
    async fn present(&self, request: &ChallengeRequest) -> Result<ChallengeOutcome, crate::Error>;

    /// Ensure the challenge TXT record with this request's value is gone
    async fn clean_up(&self, request: &ChallengeRequest)
    -> Result<ChallengeOutcome, crate::Error>;
}

/// Helper trait for constructing solvers from settings
pub trait SolverFactory: Send + Sync {
    /// Create a solver instance
    fn create(
        &self,
        settings: &crate::config::SolverSettings,
    ) -> Result<Box<dyn ChallengeSolver>, crate::Error>;
}
