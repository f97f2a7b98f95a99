use crate::core::Storage;
use crate::utils::error::{ChartError, Result};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`; absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Storage relative to the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|source| ChartError::DatasetNotFound {
                path: full_path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sets.csv"), "year\n2001\n").unwrap();

        let storage = LocalStorage::new(dir.path());
        let data = storage.read_file("sets.csv").await.unwrap();

        assert_eq!(data, b"year\n2001\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_dataset_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("sets.csv").await.unwrap_err();

        match err {
            ChartError::DatasetNotFound { path, source } => {
                assert!(path.ends_with("sets.csv"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
