// # dns01-core
//
// Core library for ACME DNS-01 challenge solvers.
//
// ## Architecture Overview
//
// - **ChallengeSolver**: Trait a host runtime dispatches Present/CleanUp to
// - **ChallengeRequest**: One challenge (zone, FQDN, value, issuer config)
// - **SecretStore**: Trait for resolving credentials named by issuer config
// - **SolverRegistry**: Plugin-based registry for solvers
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Provider specifics live in provider crates
// 2. **Plugin-Based**: Solvers are registered by name, no hard-coded dispatch
// 3. **Stateless**: Every call re-reads provider state, nothing is cached
// 4. **Idempotency**: Present and CleanUp converge under repetition

pub mod challenge;
pub mod config;
pub mod error;
pub mod registry;
pub mod secrets;
pub mod traits;

// Re-export core types for convenience
pub use challenge::{ChallengeRequest, sub_domain, un_fqdn};
pub use config::{AmbientCredentials, IonosConfig, SecretKeySelector, SolverSettings};
pub use error::{Error, Result};
pub use registry::SolverRegistry;
pub use secrets::{FileSecretStore, MemorySecretStore};
pub use traits::{ChallengeOutcome, ChallengeSolver, SecretStore, SolverFactory};
