//! Wallet API Protocol Types (JSON-RPC 2.0)
//!
//! This module defines the message types exchanged with the wallet API
//! server. The wallet API is built on JSON-RPC 2.0 with newline-delimited
//! framing over a raw TCP stream.
//!
//! # Protocol Specification
//!
//! - JSON-RPC 2.0: <https://www.jsonrpc.org/specification>
//!
//! # Architecture
//!
//! The protocol layer is responsible only for serialization/deserialization
//! of messages. Transport concerns (TCP, framing) are handled in the
//! transport layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Method name for listing wallet transactions
pub const TX_LIST_METHOD: &str = "tx_list";

/// A JSON-RPC 2.0 request message
///
/// The params type is generic so that typed parameter structs serialize
/// with a stable field order. The wallet API server does not care about
/// field order, but the smoke test asserts the exact bytes on the wire.
///
/// # Example
///
/// ```json
/// {
///   "jsonrpc": "2.0",
///   "id": 123,
///   "method": "tx_list",
///   "params": {"filter":{},"count":10,"skip":0}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest<P> {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (used to match responses)
    pub id: u64,

    /// Method name to invoke
    pub method: String,

    /// Method parameters
    pub params: P,
}

impl<P> RpcRequest<P> {
    /// Create a new request
    pub fn new(id: u64, method: impl Into<String>, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl RpcRequest<TxListParams> {
    /// Create a `tx_list` request
    pub fn tx_list(id: u64, params: TxListParams) -> Self {
        Self::new(id, TX_LIST_METHOD, params)
    }
}

/// Transaction filter for `tx_list`
///
/// All fields are optional; an unset field places no constraint on the
/// result. An empty filter serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxFilter {
    /// Restrict to a single asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<u64>,

    /// Restrict to transactions confirmed at a specific height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    /// Restrict to a transaction status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
}

impl TxFilter {
    /// Check whether the filter places no constraints
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none() && self.height.is_none() && self.status.is_none()
    }
}

/// Parameters for the `tx_list` method
///
/// Field order matters for the byte-exact wire format: `filter`, `count`,
/// `skip`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxListParams {
    /// Transaction filter (empty filter matches everything)
    pub filter: TxFilter,

    /// Maximum number of transactions to return
    pub count: u32,

    /// Number of transactions to skip (pagination offset)
    pub skip: u32,
}

impl Default for TxListParams {
    fn default() -> Self {
        Self {
            filter: TxFilter::default(),
            count: 10,
            skip: 0,
        }
    }
}

/// A JSON-RPC 2.0 response message
///
/// A response either contains a `result` or an `error`, but never both.
/// The smoke-test client does not require responses to deserialize into
/// this type (any JSON document is accepted and reported), but callers
/// that want to inspect the envelope can re-parse into `RpcResponse`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matches the request's ID)
    pub id: u64,

    /// Result payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error information (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Create a successful response
    pub fn ok(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn err(id: u64, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    /// Get the result, or the error if unsuccessful
    pub fn into_result(self) -> Result<serde_json::Value, RpcError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(error),
            _ => Err(RpcError::internal_error(
                "Invalid response: both result and error present",
            )),
        }
    }
}

/// A JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("[Error {code}] {message}")]
pub struct RpcError {
    /// Error code (JSON-RPC defined or wallet-API specific)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// Create a new error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Parse error (-32700): Invalid JSON was received
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(-32700, message)
    }

    /// Invalid request (-32600): The JSON sent is not a valid Request object
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(-32600, message)
    }

    /// Method not found (-32601): The method does not exist
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// Invalid params (-32602): Invalid method parameter(s)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }

    /// Internal error (-32603): Internal JSON-RPC error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The exact request `test_list` harnesses expect on the wire
    const CANONICAL_REQUEST: &str =
        r#"{"jsonrpc":"2.0","id":123,"method":"tx_list","params":{"filter":{},"count":10,"skip":0}}"#;

    #[test]
    fn test_canonical_request_bytes() {
        let req = RpcRequest::tx_list(123, TxListParams::default());
        let json = serde_json::to_string(&req).unwrap();

        assert_eq!(json, CANONICAL_REQUEST);
    }

    #[test]
    fn test_empty_filter_serializes_as_empty_object() {
        let filter = TxFilter::default();
        assert!(filter.is_empty());
        assert_eq!(serde_json::to_string(&filter).unwrap(), "{}");
    }

    #[test]
    fn test_populated_filter() {
        let filter = TxFilter {
            asset_id: Some(0),
            height: Some(313375),
            status: Some(3),
        };
        assert!(!filter.is_empty());

        let json = serde_json::to_string(&filter).unwrap();
        assert!(json.contains("\"asset_id\":0"));
        assert!(json.contains("\"height\":313375"));
        assert!(json.contains("\"status\":3"));
    }

    #[test]
    fn test_deserialize_request() {
        let req: RpcRequest<TxListParams> = serde_json::from_str(CANONICAL_REQUEST).unwrap();

        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.id, 123);
        assert_eq!(req.method, "tx_list");
        assert_eq!(req.params.count, 10);
        assert_eq!(req.params.skip, 0);
        assert!(req.params.filter.is_empty());
    }

    #[test]
    fn test_serialize_response_success() {
        let resp = RpcResponse::ok(123, serde_json::json!({"items": []}));
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":123"));
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_serialize_response_error() {
        let resp = RpcResponse::err(123, RpcError::method_not_found("tx_list"));
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn test_response_into_result() {
        let result = serde_json::json!({"items": []});
        let ok_resp = RpcResponse::ok(123, result.clone());
        assert!(ok_resp.is_success());
        assert_eq!(ok_resp.into_result().unwrap(), result);

        let err = RpcError::invalid_params("bad filter");
        let err_resp = RpcResponse::err(123, err.clone());
        assert!(!err_resp.is_success());
        assert_eq!(err_resp.into_result().unwrap_err(), err);
    }

    #[test]
    fn test_response_into_result_invalid() {
        let invalid = RpcResponse {
            jsonrpc: "2.0".to_string(),
            id: 123,
            result: Some(serde_json::json!({})),
            error: Some(RpcError::internal_error("boom")),
        };

        let err = invalid.into_result().unwrap_err();
        assert_eq!(err.code, -32603);
        assert!(err.message.contains("Invalid response"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RpcError::parse_error("x").code, -32700);
        assert_eq!(RpcError::invalid_request("x").code, -32600);
        assert_eq!(RpcError::method_not_found("x").code, -32601);
        assert_eq!(RpcError::invalid_params("x").code, -32602);
        assert_eq!(RpcError::internal_error("x").code, -32603);
    }

    #[test]
    fn test_error_display() {
        let err = RpcError::new(-32601, "Method not found: tx_list");
        assert_eq!(err.to_string(), "[Error -32601] Method not found: tx_list");
    }

    #[test]
    fn test_round_trip_request() {
        let original = RpcRequest::tx_list(
            42,
            TxListParams {
                filter: TxFilter {
                    asset_id: Some(7),
                    ..Default::default()
                },
                count: 25,
                skip: 50,
            },
        );

        let json = serde_json::to_string(&original).unwrap();
        let deserialized: RpcRequest<TxListParams> = serde_json::from_str(&json).unwrap();

        assert_eq!(original, deserialized);
    }
}
