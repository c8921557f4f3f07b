//! txsmoke Library
//!
//! This library provides a smoke-test client for a wallet API server
//! speaking newline-delimited JSON-RPC 2.0 over TCP: the protocol types,
//! the TCP transport with explicit framing, the connection state machine,
//! and configuration loading.

pub mod config;
pub mod rpc;
