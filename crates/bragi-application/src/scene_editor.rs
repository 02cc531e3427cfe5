//! In-memory editing state for a single scenario.
//!
//! `SceneEditor` owns one scenario document while the author works on it.
//! Every mutation is local and synchronous; nothing reaches storage until
//! [`SceneEditor::commit`] sends the whole document.

use std::fmt;
use std::str::FromStr;

use bragi_core::error::{BragiError, Result};
use bragi_core::scenario::{Scenario, ScenarioRepository, Scene, SceneKind};

/// Confirmation shown after a successful commit.
pub const SAVED_MESSAGE: &str = "Scenario saved successfully.";

/// A scene field that can be edited through [`SceneEditor::update_scene_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneField {
    Name,
    Kind,
    Image,
}

impl FromStr for SceneField {
    type Err = BragiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SceneField::Name),
            "type" | "kind" => Ok(SceneField::Kind),
            "image" => Ok(SceneField::Image),
            other => Err(BragiError::invalid_input(format!(
                "Unknown scene field '{}' (expected name, type or image)",
                other
            ))),
        }
    }
}

impl fmt::Display for SceneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SceneField::Name => "name",
            SceneField::Kind => "type",
            SceneField::Image => "image",
        })
    }
}

/// Outcome of the last commit, for display to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Saved(String),
    Failed(String),
}

/// An interactive rename that has been started but not yet finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRename {
    pub scene_id: String,
    pub buffer: String,
}

/// Editing state for one scenario and its scenes.
#[derive(Debug, Clone)]
pub struct SceneEditor {
    scenario: Scenario,
    pending_rename: Option<PendingRename>,
    dirty: bool,
    status: Option<EditorStatus>,
}

impl SceneEditor {
    /// Creates an editor seeded with `scenario`.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            pending_rename: None,
            dirty: false,
            status: None,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenario.scenes
    }

    pub fn pending_rename(&self) -> Option<&PendingRename> {
        self.pending_rename.as_ref()
    }

    /// Whether the scenario changed since it was loaded or last committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status(&self) -> Option<&EditorStatus> {
        self.status.as_ref()
    }

    /// Appends a panoramic scene named after the new scene count and returns its id.
    pub fn add_scene(&mut self) -> String {
        let scene = Scene::new(format!("Scene {}", self.scenario.scenes.len() + 1));
        let id = scene.id.clone();
        self.scenario.scenes.push(scene);
        self.dirty = true;
        id
    }

    /// Removes the scene with `scene_id` and returns it.
    pub fn delete_scene(&mut self, scene_id: &str) -> Result<Scene> {
        let index = self
            .scenario
            .scenes
            .iter()
            .position(|s| s.id == scene_id)
            .ok_or_else(|| BragiError::not_found("Scene", scene_id))?;

        if self
            .pending_rename
            .as_ref()
            .is_some_and(|p| p.scene_id == scene_id)
        {
            self.pending_rename = None;
        }

        self.dirty = true;
        Ok(self.scenario.scenes.remove(index))
    }

    /// Sets one field on the scene with `scene_id`.
    ///
    /// `value` is parsed per field: `type` accepts `panoramic` or `flat`, and
    /// an empty `image` clears the image.
    pub fn update_scene_field(
        &mut self,
        scene_id: &str,
        field: SceneField,
        value: &str,
    ) -> Result<()> {
        let kind = match field {
            SceneField::Kind => Some(value.parse::<SceneKind>()?),
            _ => None,
        };

        let scene = self.scene_mut(scene_id)?;
        match field {
            SceneField::Name => scene.name = value.to_string(),
            SceneField::Kind => scene.kind = kind.unwrap_or_default(),
            SceneField::Image => {
                let value = value.trim();
                scene.image = (!value.is_empty()).then(|| value.to_string());
            }
        }

        self.dirty = true;
        Ok(())
    }

    /// Starts an interactive rename, copying the current name into the buffer.
    ///
    /// Any rename already in progress is discarded.
    pub fn begin_rename(&mut self, scene_id: &str) -> Result<&PendingRename> {
        let name = self.scene_mut(scene_id)?.name.clone();
        Ok(&*self.pending_rename.insert(PendingRename {
            scene_id: scene_id.to_string(),
            buffer: name,
        }))
    }

    /// Replaces the rename buffer with `text`.
    pub fn edit_rename(&mut self, text: impl Into<String>) -> Result<()> {
        let pending = self
            .pending_rename
            .as_mut()
            .ok_or_else(|| BragiError::invalid_input("No scene is being renamed."))?;
        pending.buffer = text.into();
        Ok(())
    }

    /// Writes the rename buffer back as the scene name and leaves edit mode.
    ///
    /// Returns the renamed scene id, or `None` when no rename was in progress.
    pub fn finish_rename(&mut self) -> Option<String> {
        let pending = self.pending_rename.take()?;
        let scene = self.scenario.scene_mut(&pending.scene_id)?;
        if scene.name != pending.buffer {
            scene.name = pending.buffer;
            self.dirty = true;
        }
        Some(pending.scene_id)
    }

    /// Leaves edit mode without touching the scene name.
    pub fn cancel_rename(&mut self) {
        self.pending_rename = None;
    }

    /// Sends the whole scenario to `repository`.
    ///
    /// A pending rename is finished first, the same way leaving the input
    /// field does. On failure the in-memory edits are kept as they are.
    pub async fn commit(&mut self, repository: &dyn ScenarioRepository) -> Result<()> {
        self.finish_rename();

        let document = self.scenario.to_document()?;
        tracing::debug!(
            "[SceneEditor] Committing scenario {} with {} scene(s)",
            self.scenario.id,
            self.scenario.scenes.len()
        );

        match repository.save(document).await {
            Ok(_) => {
                self.dirty = false;
                self.status = Some(EditorStatus::Saved(SAVED_MESSAGE.to_string()));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[SceneEditor] Commit of {} failed: {}", self.scenario.id, e);
                self.status = Some(EditorStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn scene_mut(&mut self, scene_id: &str) -> Result<&mut Scene> {
        self.scenario
            .scene_mut(scene_id)
            .ok_or_else(|| BragiError::not_found("Scene", scene_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bragi_infrastructure::JsonDirScenarioRepository;
    use serde_json::Value;
    use tempfile::TempDir;

    struct FailingRepository;

    #[async_trait]
    impl ScenarioRepository for FailingRepository {
        async fn list_all(&self) -> Result<Vec<Value>> {
            Err(BragiError::storage("disk on fire"))
        }

        async fn save(&self, _document: Value) -> Result<Value> {
            Err(BragiError::Remote {
                status: 500,
                message: "Failed to save data to file.".to_string(),
            })
        }
    }

    fn editor() -> SceneEditor {
        SceneEditor::new(Scenario::new("Midgard Saga"))
    }

    #[test]
    fn test_add_scene_defaults() {
        let mut editor = editor();
        let id = editor.add_scene();

        let scene = editor.scenario().scene(&id).unwrap();
        assert_eq!(scene.name, "Scene 1");
        assert_eq!(scene.kind, SceneKind::Panoramic);
        assert_eq!(scene.image, None);
        assert!(editor.is_dirty());

        editor.add_scene();
        assert_eq!(editor.scenes()[1].name, "Scene 2");
        assert_ne!(editor.scenes()[0].id, editor.scenes()[1].id);
    }

    #[test]
    fn test_add_then_delete_restores_scene_list() {
        let mut editor = editor();
        editor.add_scene();
        let before = editor.scenes().to_vec();

        let id = editor.add_scene();
        let removed = editor.delete_scene(&id).unwrap();

        assert_eq!(removed.id, id);
        assert_eq!(editor.scenes(), before.as_slice());
    }

    #[test]
    fn test_delete_unknown_scene() {
        let mut editor = editor();
        editor.add_scene();
        let err = editor.delete_scene("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(editor.scenes().len(), 1);
    }

    #[test]
    fn test_update_scene_fields() {
        let mut editor = editor();
        let id = editor.add_scene();

        editor
            .update_scene_field(&id, SceneField::Name, "Bifrost")
            .unwrap();
        editor
            .update_scene_field(&id, SceneField::Kind, "flat")
            .unwrap();
        editor
            .update_scene_field(&id, SceneField::Image, "bifrost.jpg")
            .unwrap();

        let scene = editor.scenario().scene(&id).unwrap();
        assert_eq!(scene.name, "Bifrost");
        assert_eq!(scene.kind, SceneKind::Flat);
        assert_eq!(scene.image.as_deref(), Some("bifrost.jpg"));

        editor
            .update_scene_field(&id, SceneField::Image, "  ")
            .unwrap();
        assert_eq!(editor.scenario().scene(&id).unwrap().image, None);
    }

    #[test]
    fn test_update_rejects_bad_type_and_unknown_scene() {
        let mut editor = editor();
        let id = editor.add_scene();

        let err = editor
            .update_scene_field(&id, SceneField::Kind, "cubemap")
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            editor.scenario().scene(&id).unwrap().kind,
            SceneKind::Panoramic
        );

        let err = editor
            .update_scene_field("missing", SceneField::Name, "x")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scene_field_parsing() {
        assert_eq!("name".parse::<SceneField>().unwrap(), SceneField::Name);
        assert_eq!("TYPE".parse::<SceneField>().unwrap(), SceneField::Kind);
        assert_eq!("image".parse::<SceneField>().unwrap(), SceneField::Image);
        assert!("colour".parse::<SceneField>().is_err());
    }

    #[test]
    fn test_rename_two_phase() {
        let mut editor = editor();
        let id = editor.add_scene();

        let pending = editor.begin_rename(&id).unwrap();
        assert_eq!(pending.buffer, "Scene 1");

        editor.edit_rename("Yggdrasil").unwrap();
        // The scene keeps its name until the edit is finished.
        assert_eq!(editor.scenario().scene(&id).unwrap().name, "Scene 1");

        assert_eq!(editor.finish_rename(), Some(id.clone()));
        assert_eq!(editor.scenario().scene(&id).unwrap().name, "Yggdrasil");
        assert!(editor.pending_rename().is_none());
        assert_eq!(editor.finish_rename(), None);
    }

    #[test]
    fn test_cancel_rename_keeps_name() {
        let mut editor = editor();
        let id = editor.add_scene();

        editor.begin_rename(&id).unwrap();
        editor.edit_rename("Discarded").unwrap();
        editor.cancel_rename();

        assert_eq!(editor.scenario().scene(&id).unwrap().name, "Scene 1");
        assert!(editor.edit_rename("late").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_deleting_renamed_scene_cancels_rename() {
        let mut editor = editor();
        let id = editor.add_scene();
        editor.begin_rename(&id).unwrap();

        editor.delete_scene(&id).unwrap();
        assert!(editor.pending_rename().is_none());
    }

    #[tokio::test]
    async fn test_commit_persists_whole_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonDirScenarioRepository::new(temp_dir.path()).await.unwrap();

        let mut editor = editor();
        editor.add_scene();
        editor.commit(&repo).await.unwrap();

        assert!(!editor.is_dirty());
        assert_eq!(
            editor.status(),
            Some(&EditorStatus::Saved(SAVED_MESSAGE.to_string()))
        );

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        let scenario = Scenario::from_document(stored[0].clone()).unwrap();
        assert_eq!(&scenario, editor.scenario());
        assert_eq!(scenario.scenes.len(), 1);
    }

    #[tokio::test]
    async fn test_commit_finishes_pending_rename() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonDirScenarioRepository::new(temp_dir.path()).await.unwrap();

        let mut editor = editor();
        let id = editor.add_scene();
        editor.begin_rename(&id).unwrap();
        editor.edit_rename("Asgard").unwrap();
        editor.commit(&repo).await.unwrap();

        let stored = Scenario::from_document(repo.list_all().await.unwrap().remove(0)).unwrap();
        assert_eq!(stored.scenes[0].name, "Asgard");
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_edits() {
        let mut editor = editor();
        editor.add_scene();
        let before = editor.scenario().clone();

        let err = editor.commit(&FailingRepository).await.unwrap_err();
        assert!(matches!(err, BragiError::Remote { status: 500, .. }));

        assert!(editor.is_dirty());
        assert_eq!(editor.scenario(), &before);
        assert!(matches!(editor.status(), Some(EditorStatus::Failed(_))));
    }
}
