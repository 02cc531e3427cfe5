//! Validation rules for raw scenario documents.
//!
//! The persistence layer stores whatever JSON object the client sends, so
//! these checks are the only gate between a request body and a file name.

use serde_json::Value;

use crate::error::{BragiError, Result};

/// Message returned when a save request carries no usable document.
pub const EMPTY_DOCUMENT_MESSAGE: &str = "No JSON data provided in the request body.";

/// Checks that `document` can be persisted and returns its identifier.
///
/// A document is accepted when it is a non-empty JSON object whose `id`
/// field is a string usable as a file stem.
pub fn document_id(document: &Value) -> Result<&str> {
    let object = match document.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return Err(BragiError::invalid_input(EMPTY_DOCUMENT_MESSAGE)),
    };

    let id = object
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| BragiError::invalid_input("Scenario document must have a string 'id'."))?;

    if !is_safe_file_stem(id) {
        return Err(BragiError::invalid_input(format!(
            "Scenario id '{}' cannot be used as a file name.",
            id
        )));
    }

    Ok(id)
}

fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| matches!(c, '/' | '\\' | '\0'))
}
