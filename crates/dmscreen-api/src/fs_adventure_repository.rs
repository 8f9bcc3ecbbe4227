//! Filesystem-backed adventure repository.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use dmscreen_core::adventure::Adventure;
use dmscreen_core::error::DomainError;
use dmscreen_core::repository::AdventureRepository;
use tracing::{debug, instrument};

/// Serves adventures stored as `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FsAdventureRepository {
    dir: PathBuf,
}

impl FsAdventureRepository {
    /// Create a repository rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Ids are used as file names, so only a conservative alphabet is accepted.
fn is_valid_id(adventure_id: &str) -> bool {
    !adventure_id.is_empty()
        && adventure_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl AdventureRepository for FsAdventureRepository {
    #[instrument(skip(self))]
    async fn load_adventure(&self, adventure_id: &str) -> Result<Adventure, DomainError> {
        if !is_valid_id(adventure_id) {
            return Err(DomainError::AdventureNotFound(adventure_id.to_owned()));
        }

        let path = self.dir.join(format!("{adventure_id}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Adventure file missing");
                return Err(DomainError::AdventureNotFound(adventure_id.to_owned()));
            }
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Infrastructure(format!("adventure {adventure_id} is not valid JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use dmscreen_core::error::DomainError;
    use dmscreen_core::repository::AdventureRepository;

    use super::FsAdventureRepository;

    #[tokio::test]
    async fn test_load_adventure_reads_json_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1.json"),
            r#"{"name":"Goblin Ambush","creatures":[{"name":"Goblin"}]}"#,
        )
        .unwrap();
        let repo = FsAdventureRepository::new(dir.path());

        // Act
        let adventure = repo.load_adventure("1").await.unwrap();

        // Assert
        assert_eq!(adventure.creatures.len(), 1);
        assert_eq!(adventure.extra["name"], "Goblin Ambush");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsAdventureRepository::new(dir.path());

        let result = repo.load_adventure("2").await;

        assert!(matches!(result, Err(DomainError::AdventureNotFound(id)) if id == "2"));
    }

    #[tokio::test]
    async fn test_path_traversal_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsAdventureRepository::new(dir.path());

        let result = repo.load_adventure("../secrets").await;

        assert!(matches!(result, Err(DomainError::AdventureNotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_infrastructure_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ nope").unwrap();
        let repo = FsAdventureRepository::new(dir.path());

        let result = repo.load_adventure("bad").await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
