//! Wallet API Transport Layer
//!
//! This module defines the transport abstraction for talking to a wallet
//! API server. The wire format is newline-delimited JSON over a raw TCP
//! stream: every message is one JSON document terminated by a single `\n`.
//!
//! # Architecture
//!
//! The transport layer is responsible only for sending and receiving
//! framed messages. Protocol concerns (JSON-RPC envelope shape) are
//! handled in the protocol layer.
//!
//! # Framing
//!
//! Inbound bytes are accumulated in a buffer until the first `\n` is
//! observed; only the prefix up to the newline is parsed as JSON. Bytes
//! after the newline stay in the buffer. Accumulation preserves byte
//! order exactly regardless of how the peer's writes are chunked by the
//! kernel.

use crate::rpc::protocol::RpcRequest;
use anyhow::{Context, Result};
use bytes::BytesMut;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Transport trait for wallet API communication
///
/// The smoke client is generic over this trait so tests can substitute
/// scripted transports for a live TCP connection.
#[allow(async_fn_in_trait)]
pub trait Transport: Send {
    /// Send a request to the server, framed with a trailing newline
    async fn send<P: Serialize + Sync>(&mut self, request: &RpcRequest<P>) -> Result<()>;

    /// Receive the next framed JSON document from the server
    ///
    /// Returns `Ok(Some(doc))` once a complete line has arrived and
    /// parsed, `Ok(None)` if the peer closed the connection before a
    /// complete line, and an error if the line is not valid JSON or the
    /// read fails. Blocks indefinitely while the peer stays silent; there
    /// is deliberately no timeout.
    async fn recv(&mut self) -> Result<Option<serde_json::Value>>;

    /// Actively close the connection
    async fn close(&mut self) -> Result<()>;

    /// Check if the transport is still connected
    fn is_connected(&self) -> bool;
}

/// Split one newline-terminated frame off the front of `buf`
///
/// Returns the frame contents without the terminating newline, or `None`
/// if no newline has been accumulated yet. Any bytes after the newline
/// remain in `buf`.
pub fn split_frame(buf: &mut BytesMut) -> Option<BytesMut> {
    let pos = buf.iter().position(|&b| b == b'\n')?;
    let mut frame = buf.split_to(pos + 1);
    frame.truncate(pos);
    Some(frame)
}

/// TCP transport for a wallet API server
///
/// Owns the connection and the response accumulation buffer. Each
/// transport instance is fully independent, so multiple concurrent
/// clients cannot bleed state into each other.
///
/// # Example
///
/// ```ignore
/// let mut transport = TcpTransport::connect("127.0.0.1", 10000).await?;
/// transport.send(&request).await?;
/// let response = transport.recv().await?;
/// transport.close().await?;
/// ```
pub struct TcpTransport {
    /// The underlying TCP stream
    stream: TcpStream,

    /// Peer address string (for diagnostics)
    peer: String,

    /// Accumulator for inbound bytes until a newline is observed
    buf: BytesMut,

    /// Whether the transport is still connected
    connected: bool,
}

impl TcpTransport {
    /// Connect to a wallet API server
    ///
    /// There is no connect timeout; a refused or unreachable peer
    /// surfaces as an error from the underlying connect call.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        tracing::debug!("Connecting to wallet API server at {}:{}", host, port);

        let stream = TcpStream::connect((host, port))
            .await
            .with_context(|| format!("Failed to connect to {}:{}", host, port))?;

        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| format!("{}:{}", host, port));

        Ok(Self {
            stream,
            peer,
            buf: BytesMut::with_capacity(4096),
            connected: true,
        })
    }

    /// Get the peer address string (for diagnostics)
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl Transport for TcpTransport {
    /// Serialize the request and write it as a single newline-terminated line
    async fn send<P: Serialize + Sync>(&mut self, request: &RpcRequest<P>) -> Result<()> {
        if !self.connected {
            return Err(anyhow::anyhow!("Transport is not connected"));
        }

        let json =
            serde_json::to_string(request).context("Failed to serialize request to JSON")?;

        tracing::debug!("Sending to {}: {}", self.peer, json);

        self.stream
            .write_all(json.as_bytes())
            .await
            .context("Failed to write request to server")?;

        // Exactly one newline terminates the frame
        self.stream
            .write_all(b"\n")
            .await
            .context("Failed to write frame terminator to server")?;

        self.stream
            .flush()
            .await
            .context("Failed to flush request to server")?;

        Ok(())
    }

    /// Accumulate inbound chunks until a newline arrives, then parse the frame
    async fn recv(&mut self) -> Result<Option<serde_json::Value>> {
        if !self.connected {
            return Err(anyhow::anyhow!("Transport is not connected"));
        }

        loop {
            if let Some(frame) = split_frame(&mut self.buf) {
                let text = String::from_utf8_lossy(&frame);
                tracing::debug!("Received from {}: {}", self.peer, text);

                let doc: serde_json::Value = serde_json::from_slice(&frame)
                    .with_context(|| format!("Failed to parse response as JSON: {}", text))?;

                return Ok(Some(doc));
            }

            let n = self
                .stream
                .read_buf(&mut self.buf)
                .await
                .context("Failed to read from server")?;

            if n == 0 {
                // Peer closed before completing a frame
                self.connected = false;
                if !self.buf.is_empty() {
                    tracing::warn!(
                        "Peer {} closed with {} unframed bytes buffered",
                        self.peer,
                        self.buf.len()
                    );
                }
                return Ok(None);
            }
        }
    }

    /// Shut down the write half and mark the transport closed
    async fn close(&mut self) -> Result<()> {
        if self.connected {
            tracing::debug!("Closing connection to {}", self.peer);
            self.stream
                .shutdown()
                .await
                .context("Failed to shut down connection")?;
            self.connected = false;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
