//! REST API handlers for scenario persistence.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use bragi_core::api::{ApiResponse, SAVE_PATH};
use bragi_core::error::{BragiError, Result};
use bragi_core::scenario::EMPTY_DOCUMENT_MESSAGE;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::state::AppState;

pub const LIST_FAILED_MESSAGE: &str = "Failed to list scenarios.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save data to file.";
pub const SAVED_MESSAGE: &str = "Data saved successfully.";

type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);

/// GET `/api/scenarios` - Returns every stored scenario document.
///
/// # Response
/// ```json
/// { "success": true, "data": [ { "id": "…", "name": "…", "scenes": [] } ] }
/// ```
///
/// - `200 OK` with the readable documents (unparseable files are skipped)
/// - `500 INTERNAL_SERVER_ERROR` if the storage directory cannot be read
pub async fn list_scenarios_handler(State(state): State<AppState>) -> ApiReply<Vec<Value>> {
    match state.repository.list_all().await {
        Ok(documents) => (StatusCode::OK, Json(ApiResponse::ok(documents))),
        Err(err) => {
            error!("Error reading scenarios directory: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(LIST_FAILED_MESSAGE)),
            )
        }
    }
}

/// POST `/api/savejson` - Saves (creates or overwrites) a scenario document.
///
/// The body is read raw so that a missing body, malformed JSON or a wrong
/// content type all produce the JSON failure envelope. A body that is not
/// declared as `application/json` is treated as absent.
///
/// # Response
/// - `200 OK` with the saved document echoed back in `data`
/// - `400 BAD_REQUEST` if the body is empty, not JSON, not an object, or has no usable `id`
/// - `500 INTERNAL_SERVER_ERROR` if the file cannot be written
pub async fn save_scenario_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiReply<Value> {
    info!("Received request on {}", SAVE_PATH);

    if !is_json_content_type(&headers) {
        return failure_reply(BragiError::invalid_input(EMPTY_DOCUMENT_MESSAGE));
    }

    let document = match parse_body(&body) {
        Ok(document) => document,
        Err(err) => return failure_reply(err),
    };

    match state.repository.save(document).await {
        Ok(saved) => (
            StatusCode::OK,
            Json(ApiResponse::ok_with_message(SAVED_MESSAGE, saved)),
        ),
        Err(err) => failure_reply(err),
    }
}

/// Accepts `application/json` with optional parameters such as `charset`.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BragiError::invalid_input(EMPTY_DOCUMENT_MESSAGE));
    }
    serde_json::from_slice(body)
        .map_err(|e| BragiError::invalid_input(format!("Request body is not valid JSON: {e}")))
}

/// Client errors keep their message; everything else is logged and hidden.
fn failure_reply(err: BragiError) -> ApiReply<Value> {
    match err {
        BragiError::InvalidInput(message) => {
            warn!("Rejected save request: {message}");
            (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(message)))
        }
        other => {
            error!("Error writing file: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(SAVE_FAILED_MESSAGE)),
            )
        }
    }
}
