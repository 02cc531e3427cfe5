//! Scenario domain model.
//!
//! A scenario is the top-level authored document. It owns an ordered list of
//! scenes and is always persisted as a whole.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{BragiError, Result};

/// The kind of visual a scene presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// A 360° panoramic image.
    #[default]
    Panoramic,
    /// A regular flat image.
    Flat,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Panoramic => "panoramic",
            SceneKind::Flat => "flat",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKind {
    type Err = BragiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panoramic" => Ok(SceneKind::Panoramic),
            "flat" => Ok(SceneKind::Flat),
            other => Err(BragiError::invalid_input(format!(
                "Unknown scene type '{}' (expected 'panoramic' or 'flat')",
                other
            ))),
        }
    }
}

/// A single authored unit within a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Identifier, unique within the parent scenario.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Visual kind of the scene.
    #[serde(rename = "type", default)]
    pub kind: SceneKind,
    /// Image filename. `None` until the author picks one.
    #[serde(default)]
    pub image: Option<String>,
}

impl Scene {
    /// Creates a panoramic scene with a fresh identifier and no image.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: SceneKind::Panoramic,
            image: None,
        }
    }
}

/// The top-level authored document.
///
/// Unknown top-level keys found in a stored document are kept in `extra` so
/// that loading and committing a document never drops data written by
/// another client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Stable identifier, assigned once at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp (RFC 3339, UTC).
    pub created_at: String,
    /// Scenes in insertion order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scenario {
    /// Creates a new scenario with a generated identifier, the current time
    /// and an empty scene list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            scenes: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Returns the scene with the given identifier.
    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    /// Returns the scene with the given identifier mutably.
    pub fn scene_mut(&mut self, scene_id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == scene_id)
    }

    /// Converts the scenario into its stored JSON representation.
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reads a scenario out of a stored JSON document.
    pub fn from_document(document: Value) -> Result<Self> {
        Ok(serde_json::from_value(document)?)
    }
}
