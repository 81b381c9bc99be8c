// # Secret Store Implementations
//
// This module provides implementations of the SecretStore trait for
// different credential sources.

pub mod file;
pub mod memory;

pub use file::FileSecretStore;
pub use memory::MemorySecretStore;

use std::collections::HashMap;

/// namespace → secret name → key → value
pub(crate) type SecretTree = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// Look up a value, distinguishing a missing secret from a missing key
pub(crate) fn lookup(
    tree: &SecretTree,
    namespace: &str,
    name: &str,
    key: &str,
) -> Result<String, crate::Error> {
    let secret = tree
        .get(namespace)
        .and_then(|secrets| secrets.get(name))
        .ok_or_else(|| crate::traits::secret_store::secret_not_found(namespace, name))?;

    secret
        .get(key)
        .cloned()
        .ok_or_else(|| crate::traits::secret_store::key_not_found(namespace, name, key))
}
