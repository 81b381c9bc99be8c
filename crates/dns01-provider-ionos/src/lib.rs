// # IONOS Cloud DNS Solver
//
// This crate provides the IONOS DNS-01 solver for the dns01 system.
//
// ## Why the zone file?
//
// The IONOS record API rejects record names containing `_`, which every
// DNS-01 record (`_acme-challenge.<domain>`) has. Records are therefore
// created by appending a line to the zone's raw zone file, while listing
// and deletion still use the structured record API.
//
// ## Components
//
// - `client`: Provider Gateway (authenticated HTTP, raw zone file GET/PUT)
// - `zones`: Zone Directory (domain → zone id, deployment check)
// - `records`: Record Index (TXT listing, exact name+content match)
// - `zone_file`: Zone File Reconciler (header check, append-only patch)
// - `protocol`: ensure-present / ensure-absent
// - `solver`: `ChallengeSolver` implementation
//
// ## Architectural Constraints
//
// - No retry, backoff or caching (owned by the host runtime)
// - No background tasks
// - API token never appears in logs or Debug output

pub mod api;
pub mod client;
pub mod model;
pub mod protocol;
pub mod records;
pub mod solver;
pub mod zone_file;
pub mod zones;

pub use api::{ApiConnector, IonosApi, RecordFilter};
pub use client::{HttpConnector, IonosClient};
pub use model::{Record, Zone, ZoneState};
pub use protocol::{ensure_absent, ensure_present};
pub use solver::{IonosSolver, SOLVER_NAME};

use dns01_core::config::SolverSettings;
use dns01_core::{ChallengeSolver, Result, SolverFactory};
use std::time::Duration;

/// Factory for creating IONOS solvers
pub struct IonosFactory;

impl SolverFactory for IonosFactory {
    fn create(&self, settings: &SolverSettings) -> Result<Box<dyn ChallengeSolver>> {
        Ok(Box::new(IonosSolver::new(
            Duration::from_secs(settings.http_timeout_secs),
            settings.ambient.clone(),
            settings.dry_run,
        )))
    }
}

/// Register the IONOS solver with a registry
///
/// # Example
///
/// ```rust
/// use dns01_core::SolverRegistry;
///
/// let registry = SolverRegistry::new();
/// dns01_provider_ionos::register(&registry);
/// assert!(registry.has_solver("ionos"));
/// ```
pub fn register(registry: &dns01_core::SolverRegistry) {
    registry.register_solver(SOLVER_NAME, Box::new(IonosFactory));
}
