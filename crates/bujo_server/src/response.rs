//! Response envelope helpers.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// List responses: a bare array when records exist, the explicit
/// empty-collection envelope otherwise.
pub fn list(empty_msg: &str, documents: Vec<Value>) -> Response {
    if documents.is_empty() {
        Json(json!({"msg": empty_msg, "data": []})).into_response()
    } else {
        Json(Value::Array(documents)).into_response()
    }
}

/// Update confirmation: `{msg, data}` like the delete/update bodies the SPA
/// consumes.
pub fn updated(msg: &str, record: impl serde::Serialize) -> Response {
    Json(json!({"msg": msg, "data": record})).into_response()
}

/// Bare confirmation message.
pub fn confirmation(msg: &str) -> Response {
    Json(json!({"msg": msg})).into_response()
}
