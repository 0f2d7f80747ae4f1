//! Service-facing request handling
//!
//! Transport-agnostic handlers: each takes a parsed JSON body and returns a
//! status code plus a JSON body, so any HTTP layer can wrap them without
//! knowing pipeline internals. Client errors (structural validation, unknown
//! objectives) map to 400; anything else internal maps to 500 with the
//! message preserved under a separate key.

use serde_json::{json, Value};
use sim2100_model::error::SimError;
use sim2100_model::VERSION;

use crate::pipeline::ScenarioPipeline;

/// Status-plus-body response handed to the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// JSON response body
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn client_error(message: String) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message }),
        }
    }

    fn internal_error(message: String) -> Self {
        Self {
            status: 500,
            body: json!({
                "error": "error interno del simulador",
                "mensaje": message,
            }),
        }
    }
}

fn error_response(err: &SimError) -> ApiResponse {
    if err.is_client_error() {
        ApiResponse::client_error(err.to_string())
    } else {
        ApiResponse::internal_error(err.to_string())
    }
}

/// Handle a single scenario-generation request
#[must_use]
pub fn handle(pipeline: &ScenarioPipeline, body: &Value) -> ApiResponse {
    match pipeline.run(body) {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => ApiResponse::ok(value),
            Err(err) => ApiResponse::internal_error(err.to_string()),
        },
        Err(err) => {
            tracing::warn!(status = if err.is_client_error() { 400 } else { 500 }, error = %err, "request failed");
            error_response(&err)
        }
    }
}

/// Handle a batch request: an array of independent scenario bodies
///
/// A non-array body is a client error. Within an array, items are isolated:
/// each entry in the response is either that item's result or its error
/// object, in request order.
#[must_use]
pub fn handle_batch(pipeline: &ScenarioPipeline, body: &Value) -> ApiResponse {
    let Some(items) = body.as_array() else {
        return ApiResponse::client_error("se esperaba un arreglo de escenarios".to_string());
    };

    let entries: Vec<Value> = pipeline
        .run_batch(items)
        .into_iter()
        .map(|outcome| match outcome {
            Ok(result) => {
                serde_json::to_value(&result).unwrap_or_else(|err| json!({ "error": err.to_string() }))
            }
            Err(err) => json!({ "error": err.to_string() }),
        })
        .collect();

    ApiResponse::ok(json!({ "resultados": entries }))
}

/// Liveness probe
#[must_use]
pub fn health() -> ApiResponse {
    ApiResponse::ok(json!({
        "status": "healthy",
        "service": "SpatialSim 2100",
        "version": VERSION,
    }))
}
