// # Memory Secret Store
//
// In-memory implementation of SecretStore.
//
// ## When to Use
//
// - Testing environments
// - Embedding a solver where the caller already holds the credentials

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{SecretTree, lookup};
use crate::Error;
use crate::traits::SecretStore;

/// In-memory secret store
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::secrets::MemorySecretStore;
/// use dns01_core::traits::SecretStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemorySecretStore::new();
///     store.insert("cert-manager", "ionos-secret", "api-token", "s3cr3t").await;
///
///     let token = store
///         .get_secret_value("cert-manager", "ionos-secret", "api-token")
///         .await?;
///     assert_eq!(token, "s3cr3t");
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    inner: Arc<RwLock<SecretTree>>,
}

impl MemorySecretStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a single value
    pub async fn insert(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let mut tree = self.inner.write().await;
        tree.entry(namespace.into())
            .or_default()
            .entry(name.into())
            .or_default()
            .insert(key.into(), value.into());
    }
}

// Values are credentials; only the shape is printed
impl std::fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySecretStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret_value(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<String, Error> {
        let tree = self.inner.read().await;
        lookup(&tree, namespace, name, key)
    }
}
