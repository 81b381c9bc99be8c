//! Core traits for DNS-01 solvers
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ChallengeSolver`]: Present and clean up challenge records at a DNS provider
//! - [`SecretStore`]: Resolve credentials referenced by issuer configuration

pub mod challenge_solver;
pub mod secret_store;

pub use challenge_solver::{ChallengeOutcome, ChallengeSolver, SolverFactory};
pub use secret_store::SecretStore;
