//! Directory-backed ScenarioRepository implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bragi_core::error::{BragiError, Result};
use bragi_core::scenario::{ScenarioRepository, document_id};
use serde_json::Value;
use tokio::fs;

/// Scenario repository storing one pretty-printed JSON file per scenario.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── scenario-uuid-1.json
/// └── scenario-uuid-2.json
/// ```
///
/// Writes go straight to the target file. A failed write can leave a partial
/// file behind, which the next listing skips as unparseable.
pub struct JsonDirScenarioRepository {
    base_dir: PathBuf,
}

impl JsonDirScenarioRepository {
    const EXTENSION: &'static str = "json";

    /// Creates a repository rooted at `base_dir`, creating the directory if needed.
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(|e| {
            BragiError::storage(format!(
                "Failed to create scenarios directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    /// Returns the directory holding the scenario files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the file path used for the scenario with `id`.
    pub fn file_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", id, Self::EXTENSION))
    }

    /// Reads and parses a single stored document, or `None` if it must be skipped.
    async fn read_document(path: &Path) -> Option<Value> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("[ScenarioRepository] Failed to read {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => {
                tracing::warn!(
                    "[ScenarioRepository] Skipping {:?}: document is not a JSON object",
                    path
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "[ScenarioRepository] Error parsing scenario file {:?}: {}",
                    path,
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl ScenarioRepository for JsonDirScenarioRepository {
    async fn list_all(&self) -> Result<Vec<Value>> {
        let mut entries = fs::read_dir(&self.base_dir).await.map_err(|e| {
            BragiError::storage(format!(
                "Failed to read scenarios directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })?;

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(Self::EXTENSION) {
                continue;
            }
            if let Some(document) = Self::read_document(&path).await {
                documents.push(document);
            }
        }

        tracing::debug!(
            "[ScenarioRepository] Listed {} scenario(s) from {:?}",
            documents.len(),
            self.base_dir
        );
        Ok(documents)
    }

    async fn save(&self, document: Value) -> Result<Value> {
        let path = self.file_path(document_id(&document)?);
        let json = serde_json::to_string_pretty(&document)?;

        fs::write(&path, json).await.map_err(|e| {
            BragiError::storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!("[ScenarioRepository] Data successfully saved to {:?}", path);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn create_test_repository() -> (JsonDirScenarioRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonDirScenarioRepository::new(temp_dir.path().join("scenarios"))
            .await
            .unwrap();
        (repo, temp_dir)
    }

    fn create_test_document(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "scenes": [
                { "id": "scene-1", "name": "Scene 1", "type": "panoramic", "image": null }
            ]
        })
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let (repo, _temp_dir) = create_test_repository().await;
        assert!(repo.base_dir().is_dir());
    }

    #[tokio::test]
    async fn test_save_writes_pretty_file_equal_to_input() {
        let (repo, _temp_dir) = create_test_repository().await;
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let doc = create_test_document(id, "Midgard Saga");

        let saved = repo.save(doc.clone()).await.unwrap();
        assert_eq!(saved, doc);

        let content = std::fs::read_to_string(repo.file_path(id)).unwrap();
        assert_eq!(content, serde_json::to_string_pretty(&doc).unwrap());
        assert!(content.contains("\n  \"id\""));
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, doc);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_document_without_writing() {
        let (repo, _temp_dir) = create_test_repository().await;

        let err = repo.save(json!({})).await.unwrap_err();
        assert!(err.is_invalid_input());

        let err = repo.save(Value::Null).await.unwrap_err();
        assert!(err.is_invalid_input());

        assert_eq!(std::fs::read_dir(repo.base_dir()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_resave_overwrites_without_duplicates() {
        let (repo, _temp_dir) = create_test_repository().await;
        let id = "550e8400-e29b-41d4-a716-446655440001";

        repo.save(create_test_document(id, "First")).await.unwrap();
        repo.save(create_test_document(id, "Second")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let matching: Vec<_> = all.iter().filter(|d| d["id"] == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0]["name"], "Second");
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_and_foreign_files() {
        let (repo, _temp_dir) = create_test_repository().await;

        repo.save(create_test_document("good-1", "One")).await.unwrap();
        repo.save(create_test_document("good-2", "Two")).await.unwrap();
        std::fs::write(repo.base_dir().join("broken.json"), "{ \"id\": \"half").unwrap();
        std::fs::write(repo.base_dir().join("array.json"), "[1, 2, 3]").unwrap();
        std::fs::write(repo.base_dir().join("notes.txt"), "not a scenario").unwrap();

        let all = repo.list_all().await.unwrap();
        let mut ids: Vec<&str> = all.iter().filter_map(|d| d["id"].as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["good-1", "good-2"]);
    }

    #[tokio::test]
    async fn test_list_fails_when_directory_is_gone() {
        let (repo, _temp_dir) = create_test_repository().await;
        std::fs::remove_dir_all(repo.base_dir()).unwrap();

        let err = repo.list_all().await.unwrap_err();
        assert!(err.is_storage());
    }
}
