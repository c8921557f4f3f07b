//! Smoke-Test Client Layer
//!
//! This module provides the high-level smoke-test client that drives one
//! request/response exchange against a wallet API server.
//!
//! # Architecture
//!
//! The client is generic over the transport layer, allowing it to work
//! with different transport mechanisms through the [`Transport`] trait.
//! It models the original callback hooks (on-connect, on-data, on-close)
//! as an explicit connection state machine, which makes the "only close
//! after a full response" rule testable instead of implicit in callback
//! ordering.
//!
//! # Usage
//!
//! ```ignore
//! use txsmoke::rpc::{RpcRequest, SmokeClient, TcpTransport, TxListParams};
//!
//! let transport = TcpTransport::connect("127.0.0.1", 10000).await?;
//! let mut client = SmokeClient::new(transport);
//!
//! let request = RpcRequest::tx_list(123, TxListParams::default());
//! match client.run(&request).await? {
//!     Some(doc) => println!("got: {}", doc),
//!     None => println!("server closed without responding"),
//! }
//! ```

use crate::rpc::protocol::RpcRequest;
use crate::rpc::transport::Transport;
use anyhow::{Context, Result};
use serde::Serialize;

/// Connection state machine
///
/// One forward-only pass: the request may be sent once, after which the
/// client waits for a single framed response and then the connection is
/// closed (actively on a full response, or by the peer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connection established, request not yet sent
    Connecting,

    /// Request sent, waiting for a newline-framed response
    AwaitingResponse,

    /// Connection closed (locally or by the peer)
    Closed,
}

/// High-level smoke-test client
///
/// Drives exactly one request/response exchange. Each client owns its
/// transport (and through it the response buffer), so concurrent client
/// instances are fully independent.
///
/// # Type Parameters
///
/// * `T` - The transport type (e.g., `TcpTransport`)
pub struct SmokeClient<T>
where
    T: Transport,
{
    /// Underlying transport for sending/receiving messages
    transport: T,

    /// Connection state
    state: ConnectionState,
}

impl<T> SmokeClient<T>
where
    T: Transport,
{
    /// Create a new client around an established transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ConnectionState::Connecting,
        }
    }

    /// Get the current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request, transitioning to `AwaitingResponse`
    ///
    /// # Errors
    ///
    /// Returns an error if a request was already sent on this connection
    /// or if the transport write fails. A failed write leaves the client
    /// in `Closed`; there is no retry.
    pub async fn send_request<P: Serialize + Sync>(
        &mut self,
        request: &RpcRequest<P>,
    ) -> Result<()> {
        if self.state != ConnectionState::Connecting {
            return Err(anyhow::anyhow!(
                "Request already sent (state: {:?})",
                self.state
            ));
        }

        match self.transport.send(request).await {
            Ok(()) => {
                self.state = ConnectionState::AwaitingResponse;
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Closed;
                Err(e).context("Failed to send request")
            }
        }
    }

    /// Wait for the response, then close
    ///
    /// Returns `Ok(Some(doc))` with the parsed response document, or
    /// `Ok(None)` if the peer closed the connection before a complete
    /// frame arrived (a clean closure, not an error). On a full response
    /// the connection is closed actively. Waits without any timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame fails to parse as JSON or the read
    /// fails; either way the client ends up `Closed`.
    pub async fn wait_response(&mut self) -> Result<Option<serde_json::Value>> {
        if self.state != ConnectionState::AwaitingResponse {
            return Err(anyhow::anyhow!(
                "Not awaiting a response (state: {:?})",
                self.state
            ));
        }

        match self.transport.recv().await {
            Ok(Some(doc)) => {
                // Full response observed: close actively
                self.transport
                    .close()
                    .await
                    .context("Failed to close connection after response")?;
                self.state = ConnectionState::Closed;
                Ok(Some(doc))
            }
            Ok(None) => {
                tracing::debug!("Peer closed before sending a complete response");
                self.state = ConnectionState::Closed;
                Ok(None)
            }
            Err(e) => {
                self.state = ConnectionState::Closed;
                Err(e)
            }
        }
    }

    /// Run the full exchange: send the request, wait for the response
    pub async fn run<P: Serialize + Sync>(
        &mut self,
        request: &RpcRequest<P>,
    ) -> Result<Option<serde_json::Value>> {
        self.send_request(request).await?;
        self.wait_response().await
    }
}
