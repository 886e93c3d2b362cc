use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{AppError, Result};

/// One officer account at the leaf of the credentials tree
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialEntry {
    pub id: String,
    pub password: String,
    pub name: String,
}

/// department → role → district → account
pub type CredentialTree = BTreeMap<String, BTreeMap<String, BTreeMap<String, CredentialEntry>>>;

/// Officer accounts loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    tree: CredentialTree,
}

impl Credentials {
    pub fn new(tree: CredentialTree) -> Self {
        Self { tree }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Fixture(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let tree: CredentialTree = serde_json::from_str(&raw).map_err(|e| {
            AppError::Fixture(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Self::new(tree))
    }

    pub fn lookup(
        &self,
        department: &str,
        role: &str,
        district: &str,
    ) -> Option<&CredentialEntry> {
        self.tree.get(department)?.get(role)?.get(district)
    }

    pub fn tree(&self) -> &CredentialTree {
        &self.tree
    }

    pub fn account_count(&self) -> usize {
        self.tree
            .values()
            .flat_map(|roles| roles.values())
            .map(|districts| districts.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::data_file;

    #[tokio::test]
    async fn test_load_bundled_credentials() {
        let credentials = Credentials::load(&data_file("credentials.json"))
            .await
            .unwrap();

        assert_eq!(credentials.account_count(), 4);
        let entry = credentials
            .lookup("Public Works", "Executive Engineer", "Ranchi")
            .unwrap();
        assert_eq!(entry.id, "ee.ranchi");
        assert_eq!(entry.name, "Manoj Rao");
    }

    #[tokio::test]
    async fn test_missing_levels_lookup_none() {
        let credentials = Credentials::load(&data_file("credentials.json"))
            .await
            .unwrap();

        assert!(credentials.lookup("Parks", "Executive Engineer", "Ranchi").is_none());
        assert!(credentials.lookup("Sanitation", "Junior Engineer", "Ranchi").is_none());
        assert!(credentials.lookup("Sanitation", "Executive Engineer", "Bokaro").is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Credentials::load(Path::new("does/not/exist.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fixture(msg) if msg.contains("does/not/exist.json")));
    }
}
