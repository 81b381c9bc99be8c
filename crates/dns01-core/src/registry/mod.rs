//! Plugin-based solver registry
//!
//! The registry lets solver crates register themselves under the name the
//! host runtime dispatches on, avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dns01_core::registry::SolverRegistry;
//! use dns01_core::config::SolverSettings;
//!
//! let registry = SolverRegistry::new();
//! dns01_provider_ionos::register(&registry);
//!
//! let solver = registry.create_solver("ionos", &SolverSettings::default())?;
//! ```

use crate::config::SolverSettings;
use crate::error::{Error, Result};
use crate::traits::{ChallengeSolver, SolverFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Solver registry
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct SolverRegistry {
    solvers: RwLock<HashMap<String, Box<dyn SolverFactory>>>,
}

impl SolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver factory
    ///
    /// A later registration under the same name replaces the earlier one.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use dns01_core::registry::SolverRegistry;
    /// # use dns01_core::traits::SolverFactory;
    /// # struct MyFactory;
    /// # impl SolverFactory for MyFactory {
    /// #     fn create(&self, settings: &dns01_core::config::SolverSettings) -> dns01_core::Result<Box<dyn dns01_core::ChallengeSolver>> { unimplemented!() }
    /// # }
    /// let registry = SolverRegistry::new();
    /// registry.register_solver("mysolver", Box::new(MyFactory));
    /// ```
    pub fn register_solver(&self, name: impl Into<String>, factory: Box<dyn SolverFactory>) {
        let name = name.into();
        tracing::debug!("Registering solver: {}", name);
        let mut solvers = self
            .solvers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        solvers.insert(name, factory);
    }

    /// Create a solver by name
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ChallengeSolver>)`: Created solver instance
    /// - `Err(Error::UnknownSolver)`: If no factory is registered under `name`
    pub fn create_solver(
        &self,
        name: &str,
        settings: &SolverSettings,
    ) -> Result<Box<dyn ChallengeSolver>> {
        settings.validate()?;

        let solvers = self
            .solvers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let factory = solvers
            .get(name)
            .ok_or_else(|| Error::UnknownSolver(name.to_string()))?;

        factory.create(settings)
    }

    /// List all registered solver names
    pub fn list_solvers(&self) -> Vec<String> {
        let solvers = self
            .solvers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = solvers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a solver is registered
    pub fn has_solver(&self, name: &str) -> bool {
        let solvers = self
            .solvers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        solvers.contains_key(name)
    }
}
