//! Application layer for Bragi.
//!
//! This crate holds the client-side logic: the scene editor state machine
//! and the use case that creates, lists and opens scenarios.

pub mod scenario_usecase;
pub mod scene_editor;

pub use scenario_usecase::ScenarioUseCase;
pub use scene_editor::{EditorStatus, PendingRename, SceneEditor, SceneField};
