//! Response builders shared by the handler paths.

use crate::core::models::{ErrorBody, ResponseEnvelope, utc_timestamp};

/// Message returned to clients for any internal failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Returns a 200 OK envelope around an already serialized JSON body.
#[must_use]
pub fn ok_json(body: String) -> ResponseEnvelope {
    ResponseEnvelope::json(200, body)
}

/// Returns the 500 envelope for a failed invocation.
///
/// Only the runtime and request id are echoed back; the cause of the failure
/// stays in the logs.
#[must_use]
pub fn internal_error(runtime: &str, request_id: &str) -> ResponseEnvelope {
    let body = ErrorBody {
        error: INTERNAL_SERVER_ERROR.to_string(),
        runtime: runtime.to_string(),
        timestamp: utc_timestamp(),
        request_id: request_id.to_string(),
    };
    let body = serde_json::to_string(&body).unwrap_or_else(|_| {
        serde_json::json!({ "error": INTERNAL_SERVER_ERROR, "requestId": request_id }).to_string()
    });
    ResponseEnvelope::json(500, body)
}
