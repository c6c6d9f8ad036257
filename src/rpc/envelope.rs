//! JSON-RPC 2.0 error envelope construction.
//!
//! # Responsibilities
//! - Build the `{jsonrpc, error: {code, message}, id}` error shape
//! - Pair each error with the HTTP status the proxy returns it under
//!
//! # Design Decisions
//! - Only the three codes the proxy itself produces are modeled; backend
//!   error envelopes are relayed opaquely and never reconstructed here

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Request body was not valid JSON.
pub const INVALID_REQUEST: i64 = -32600;
/// Requested method is not on the allow-list.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Backend call failed or timed out.
pub const INTERNAL_ERROR: i64 = -32603;

/// A JSON-RPC 2.0 error envelope plus the HTTP status to return it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcErrorResponse {
    pub code: i64,
    pub message: &'static str,
    /// Request `id` echoed back to the caller; `null` when unknown.
    pub id: Value,
    pub status: StatusCode,
}

impl RpcErrorResponse {
    /// Body could not be parsed, so no `id` is available to echo.
    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid request",
            id: Value::Null,
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn method_not_found(id: Value) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found",
            id,
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal_error(id: Value) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error",
            id,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON-RPC 2.0 error object sent as the response body.
    pub fn body(&self) -> Value {
        json!({
            "jsonrpc": "2.0",
            "error": { "code": self.code, "message": self.message },
            "id": self.id,
        })
    }
}

impl IntoResponse for RpcErrorResponse {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_has_null_id_and_400() {
        let err = RpcErrorResponse::invalid_request();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({
                "jsonrpc": "2.0",
                "error": { "code": -32600, "message": "Invalid request" },
                "id": null,
            })
        );
    }

    #[test]
    fn method_not_found_echoes_id() {
        let err = RpcErrorResponse::method_not_found(json!("abc-1"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body()["error"]["code"], json!(-32601));
        assert_eq!(err.body()["id"], json!("abc-1"));
    }

    #[test]
    fn internal_error_echoes_id_and_500() {
        let err = RpcErrorResponse::internal_error(json!(7));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body()["error"]["code"], json!(-32603));
        assert_eq!(err.body()["id"], json!(7));
    }
}
