//! Wallet API Smoke-Test Client
//!
//! This module implements a minimal client for a wallet API server that
//! speaks newline-delimited JSON-RPC 2.0 over TCP.
//!
//! # Architecture
//!
//! The implementation is organized into three layers:
//!
//! 1. **Protocol Layer** (`protocol`): JSON-RPC 2.0 message types
//! 2. **Transport Layer** (`transport`): TCP transport with newline framing
//! 3. **Client Layer** (`client`): Connection state machine and exchange driver
//!
//! # Design Principles
//!
//! - **No hidden state**: the response buffer lives inside the transport,
//!   so concurrent client instances are fully independent
//! - **Explicit lifecycle**: the connection state machine makes the
//!   "close only after a full response" rule testable
//! - **No retries, no timeouts**: a smoke test should fail loudly, and a
//!   silent server should make it hang rather than mask the problem

// Protocol layer: JSON-RPC 2.0 message types
pub mod protocol;

// Transport layer: TCP with newline framing
pub mod transport;

// Client layer: state machine and exchange driver
pub mod client;

// Re-export commonly used types for convenience
pub use protocol::{
    RpcError, RpcRequest, RpcResponse, TxFilter, TxListParams, JSONRPC_VERSION, TX_LIST_METHOD,
};

// Re-export transport types
pub use transport::{TcpTransport, Transport};

// Re-export client types
pub use client::{ConnectionState, SmokeClient};

// Property-based tests module
#[cfg(test)]
mod proptests;
