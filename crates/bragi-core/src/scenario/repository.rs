//! Scenario repository trait.
//!
//! Defines the interface for scenario persistence operations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// An abstract repository for scenario documents.
///
/// Documents are handled as raw JSON objects: the store never rewrites what
/// the client sends, it only checks that the document is a non-empty object
/// with a usable `id` (see [`super::document_id`]).
///
/// # Implementation Notes
///
/// - Saving an existing identifier overwrites the previous document.
/// - Listing skips entries that cannot be parsed instead of failing.
/// - No cross-request coordination: concurrent saves are last-write-wins.
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Lists all stored scenario documents.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Value>)`: Every readable document, in storage order
    /// - `Err(_)`: The storage itself could not be enumerated
    async fn list_all(&self) -> Result<Vec<Value>>;

    /// Saves a scenario document, replacing any previous version.
    ///
    /// # Arguments
    ///
    /// * `document` - The full scenario document
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The saved document, unchanged
    /// - `Err(BragiError::InvalidInput)`: The document was rejected
    /// - `Err(_)`: Error occurred during the write
    async fn save(&self, document: Value) -> Result<Value>;
}
