//! # TCP Transport
//!
//! Owns one byte stream to one RCON endpoint and moves whole frames across
//! it. It knows nothing about packet contents.
//!
//! ## Responsibilities
//! - Open the TCP connection, bounded by an optional connect timeout
//! - Write caller-framed bytes and flush them before returning
//! - Read exactly one frame body per call, however the bytes are chunked
//! - Release the socket on `close()` so a later `connect()` starts clean
//!
//! Reads and writes carry no timeout. A caller that needs bounded latency
//! wraps the operation in its own deadline.

use std::net::SocketAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, instrument, trace};

use crate::core::codec::FrameCodec;
use crate::error::{RconError, Result};

/// Frame transport over a single stream. Starts unconnected.
pub struct Transport<S = TcpStream> {
    framed: Option<Framed<S, FrameCodec>>,
}

impl<S> Default for Transport<S> {
    fn default() -> Self {
        Self { framed: None }
    }
}

impl<S> std::fmt::Debug for Transport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("connected", &self.framed.is_some())
            .finish()
    }
}

impl Transport<TcpStream> {
    /// Open a TCP connection to `host:port`.
    ///
    /// With a `timeout`, a connect that takes longer fails with
    /// [`RconError::ConnectTimedOut`]. Every other failure, name resolution
    /// included, is [`RconError::ConnectError`].
    #[instrument(skip(self))]
    pub async fn connect(&mut self, host: &str, port: u16, timeout: Option<Duration>) -> Result<()> {
        let connecting = TcpStream::connect((host, port));

        let stream = match timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| RconError::ConnectTimedOut)?,
            None => connecting.await,
        }
        .map_err(RconError::ConnectError)?;

        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Failed to set TCP_NODELAY");
        }

        debug!(peer = ?stream.peer_addr().ok(), "TCP connection established");
        self.attach(stream);
        Ok(())
    }

    /// Address of the connected peer, if any
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.framed
            .as_ref()
            .and_then(|framed| framed.get_ref().peer_addr().ok())
    }
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an already-connected stream, replacing any previous one.
    pub fn attach(&mut self, stream: S) {
        self.framed = Some(Framed::new(stream, FrameCodec));
    }

    pub fn is_connected(&self) -> bool {
        self.framed.is_some()
    }

    /// Write a complete length-prefixed frame and flush it to the socket.
    pub async fn write_frame(&mut self, frame: Bytes) -> Result<()> {
        let framed = self.framed.as_mut().ok_or(RconError::NotConnected)?;
        let len = frame.len();

        // `send` flushes before resolving
        framed.send(frame).await.map_err(classify)?;

        trace!(bytes = len, "Frame written");
        Ok(())
    }

    /// Read one frame and return its body, length prefix excluded.
    ///
    /// The codec keeps buffering across short reads until the declared length
    /// is satisfied. A peer close before then is [`RconError::ConnectionClosed`].
    pub async fn read_frame(&mut self) -> Result<BytesMut> {
        let framed = self.framed.as_mut().ok_or(RconError::NotConnected)?;

        match framed.next().await {
            Some(Ok(body)) => {
                trace!(bytes = body.len(), "Frame read");
                Ok(body)
            }
            Some(Err(e)) => Err(classify(e)),
            None => Err(RconError::ConnectionClosed),
        }
    }

    /// Release the stream. Closing an unconnected transport does nothing.
    pub async fn close(&mut self) {
        let Some(framed) = self.framed.take() else {
            return;
        };

        let mut stream = framed.into_inner();
        if let Err(e) = stream.shutdown().await {
            debug!(error = %e, "Error shutting down stream");
        }
    }
}

/// Socket errors surface through the codec as `Io`; separate peer closes out.
fn classify(err: RconError) -> RconError {
    match err {
        RconError::Io(io) => RconError::from_stream(io),
        other => other,
    }
}
