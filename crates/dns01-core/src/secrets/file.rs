// # File Secret Store
//
// File-based implementation of SecretStore.
//
// The file is read once when the store is created; later edits require a
// restart.
//
// ## File Format
//
// ```json
// {
//   "cert-manager": {
//     "ionos-secret": {
//       "api-token": "..."
//     }
//   }
// }
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{SecretTree, lookup};
use crate::Error;
use crate::traits::SecretStore;

/// File-backed secret store
pub struct FileSecretStore {
    path: PathBuf,
    secrets: SecretTree,
}

impl FileSecretStore {
    /// Load secrets from a JSON file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let content = fs::read_to_string(&path).await.map_err(|e| {
            Error::config(format!(
                "Failed to read secrets file {}: {}",
                path.display(),
                e
            ))
        })?;

        let secrets: SecretTree = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse secrets file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(
            "Loaded secrets file {}: {} namespace(s)",
            path.display(),
            secrets.len()
        );

        Ok(Self { path, secrets })
    }

    /// Path the store was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Values are credentials; only the path is printed
impl std::fmt::Debug for FileSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSecretStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret_value(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<String, Error> {
        lookup(&self.secrets, namespace, name, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        fs::write(
            &path,
            br#"{"cert-manager": {"ionos-secret": {"api-token": "s3cr3t"}}}"#,
        )
        .await
        .unwrap();

        let store = FileSecretStore::load(&path).await.unwrap();
        let token = store
            .get_secret_value("cert-manager", "ionos-secret", "api-token")
            .await
            .unwrap();
        assert_eq!(token, "s3cr3t");

        let missing = store
            .get_secret_value("cert-manager", "ionos-secret", "other")
            .await;
        assert!(matches!(missing, Err(Error::Credential(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = FileSecretStore::load(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_corrupted_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        fs::write(&path, b"corrupted json data").await.unwrap();

        let err = FileSecretStore::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse secrets file"));
    }

    #[tokio::test]
    async fn test_debug_hides_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        fs::write(&path, br#"{"ns": {"s": {"k": "secret_token_12345"}}}"#)
            .await
            .unwrap();

        let store = FileSecretStore::load(&path).await.unwrap();
        let debug_str = format!("{:?}", store);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("FileSecretStore"));
    }
}
