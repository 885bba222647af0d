use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::Document;
use crate::error::ApiError;
use crate::models::from_document;

/// Unwrap a JSON body that must be an object.
pub fn object_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Document, ApiError> {
    match payload? {
        Json(Value::Object(map)) => Ok(map),
        Json(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
    }
}

/// Build a typed value from fields a schema has already normalized. A failure here
/// means the schema and the type disagree, which is a server bug.
pub fn typed<T: DeserializeOwned>(fields: Document) -> Result<T, ApiError> {
    from_document(fields).map_err(|e| {
        tracing::error!("Validated document does not match its type: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}
