//! Scenario catalog use case.
//!
//! Coordinates the "pick or create a scenario, then edit it" flow on top of
//! any [`ScenarioRepository`].

use std::sync::Arc;

use bragi_core::error::{BragiError, Result};
use bragi_core::scenario::{Scenario, ScenarioRepository};

use crate::scene_editor::SceneEditor;

/// Message used when a scenario is created without a usable name.
pub const EMPTY_NAME_MESSAGE: &str = "Scenario name cannot be empty.";

/// Use case for listing, creating and opening scenarios.
pub struct ScenarioUseCase {
    repository: Arc<dyn ScenarioRepository>,
}

impl ScenarioUseCase {
    pub fn new(repository: Arc<dyn ScenarioRepository>) -> Self {
        Self { repository }
    }

    /// Lists every stored scenario.
    ///
    /// Documents that do not have the scenario shape are skipped.
    pub async fn list_scenarios(&self) -> Result<Vec<Scenario>> {
        let documents = self.repository.list_all().await?;
        let scenarios = documents
            .into_iter()
            .filter_map(|document| match Scenario::from_document(document) {
                Ok(scenario) => Some(scenario),
                Err(e) => {
                    tracing::warn!("[ScenarioUseCase] Skipping malformed scenario: {}", e);
                    None
                }
            })
            .collect();
        Ok(scenarios)
    }

    /// Creates and persists a new scenario named `name`, then opens it.
    ///
    /// The name is stored as typed; it only has to be non-blank.
    pub async fn create_scenario(&self, name: &str) -> Result<SceneEditor> {
        if name.trim().is_empty() {
            return Err(BragiError::invalid_input(EMPTY_NAME_MESSAGE));
        }

        let scenario = Scenario::new(name);
        let saved = self.repository.save(scenario.to_document()?).await?;
        let saved = Scenario::from_document(saved)?;

        tracing::info!(
            "[ScenarioUseCase] Created scenario '{}' ({})",
            saved.name,
            saved.id
        );
        Ok(SceneEditor::new(saved))
    }

    /// Opens the stored scenario with `scenario_id` in a new editor.
    pub async fn open_scenario(&self, scenario_id: &str) -> Result<SceneEditor> {
        self.list_scenarios()
            .await?
            .into_iter()
            .find(|s| s.id == scenario_id)
            .map(SceneEditor::new)
            .ok_or_else(|| BragiError::not_found("Scenario", scenario_id))
    }

    /// Commits `editor` through this use case's repository.
    pub async fn commit(&self, editor: &mut SceneEditor) -> Result<()> {
        editor.commit(self.repository.as_ref()).await
    }
}
