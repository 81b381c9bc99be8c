// # Secret Store Trait
//
// Defines how solvers resolve credentials referenced by issuer
// configuration (see `SecretKeySelector`).
//
// ## Implementations
//
// - In-memory: `MemorySecretStore` (tests, embedding)
// - File-based: `FileSecretStore` (JSON document loaded at startup)
// - Future: Kubernetes secrets via the cluster API

use async_trait::async_trait;

/// Trait for secret lookups
///
/// Implementations must be thread-safe and usable across async tasks.
/// A missing secret or a missing key is an [`Error::Credential`](crate::Error::Credential)
/// that names both the secret (`namespace/name`) and the key.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Get the value stored under `key` in secret `name` of `namespace`
    async fn get_secret_value(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<String, crate::Error>;
}

/// Error for a secret that does not exist
pub fn secret_not_found(namespace: &str, name: &str) -> crate::Error {
    crate::Error::credential(format!("secret '{}/{}' not found", namespace, name))
}

/// Error for a key missing from an existing secret
pub fn key_not_found(namespace: &str, name: &str, key: &str) -> crate::Error {
    crate::Error::credential(format!(
        "key not found \"{}\" in secret '{}/{}'",
        key, namespace, name
    ))
}
