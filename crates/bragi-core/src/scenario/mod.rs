//! Scenario domain module.
//!
//! # Module Structure
//!
//! - `model`: `Scenario`, `Scene` and `SceneKind`
//! - `document`: validation of raw JSON documents before they are stored
//! - `repository`: `ScenarioRepository` trait for persistence
//!
//! # Usage
//!
//! ```ignore
//! use bragi_core::scenario::{Scenario, Scene, SceneKind, ScenarioRepository};
//! ```

mod document;
mod model;
pub mod repository;

// Re-export public API
pub use document::{EMPTY_DOCUMENT_MESSAGE, document_id};
pub use model::{Scenario, Scene, SceneKind};

pub use repository::ScenarioRepository;
