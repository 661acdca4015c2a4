//! # RCON Session
//!
//! A [`Session`] owns exactly one [`Transport`] and drives the protocol over
//! it: connect, authenticate, then run commands and correlate each response
//! with the request that produced it.
//!
//! ## Serialization
//! The only correlation mechanism is the request id of the single packet in
//! flight, so every exchange runs under a per-session async mutex. Any number
//! of tasks may share an `Arc<Session>`; their commands queue on the lock and
//! hit the socket one write/read pair at a time.
//!
//! ## State
//! State changes happen only inside the session, while the lock is held, and
//! only after the step that justifies them has completed. `login()` in
//! particular advances to [`ConnectionState::LoggedIn`] only once the server's
//! response has been read and its id verified.
//!
//! ## Example
//! ```rust,no_run
//! use rcon_protocol::Session;
//! use std::time::Duration;
//!
//! # async fn demo() -> rcon_protocol::error::Result<()> {
//! let session = Session::new("127.0.0.1", 27020, "secret", Some(Duration::from_secs(5)));
//! session.connect().await?;
//! session.login().await?;
//! let players = session.run("listplayers", &[]).await?;
//! println!("{players}");
//! session.close().await;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::core::packet::Packet;
use crate::error::{RconError, Result};
use crate::protocol::state::ConnectionState;
use crate::transport::Transport;
use crate::utils::metrics::{Metrics, MetricsSnapshot, Timer};

/// Protocol state machine for one RCON endpoint.
pub struct Session<S = TcpStream> {
    host: String,
    port: u16,
    password: String,
    timeout: Option<Duration>,
    state: AtomicU8,
    inner: Mutex<Inner<S>>,
    metrics: Metrics,
}

struct Inner<S> {
    transport: Transport<S>,
    /// Set between writing a request and reading its response. Still set at
    /// the start of an exchange means the previous one was cancelled and its
    /// response may be sitting unread on the socket.
    in_flight: bool,
}

impl<S> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<S> Session<S> {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Current state. Never waits on an exchange in progress.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_logged_in(&self) -> bool {
        self.state() == ConnectionState::LoggedIn
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}

impl Session<TcpStream> {
    /// Create a disconnected session. Nothing touches the network until
    /// [`Session::connect`].
    pub fn new(
        host: impl Into<String>,
        port: u16,
        password: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self::build(host.into(), port, password.into(), timeout, Transport::default())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.host.clone(),
            config.port,
            config.password.clone(),
            config.connect_timeout,
        )
    }

    /// Construct, connect and log in.
    pub async fn open(config: &ClientConfig) -> Result<Self> {
        let session = Self::from_config(config);
        session.connect().await?;
        session.login().await?;
        Ok(session)
    }

    /// Open the TCP connection. A session that is already connected is left
    /// untouched.
    #[instrument(skip(self), fields(host = %self.host, port = self.port))]
    pub async fn connect(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.connect_locked(&mut inner).await
    }

    /// Close, then connect again. Does not log in; call [`Session::login`]
    /// afterwards.
    #[instrument(skip(self), fields(host = %self.host, port = self.port))]
    pub async fn reconnect(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.close_locked(&mut inner).await;
        self.connect_locked(&mut inner).await
    }

    /// Address of the connected server, if any
    pub async fn peer_addr(&self) -> Option<SocketAddr> {
        self.inner.lock().await.transport.peer_addr()
    }

    async fn connect_locked(&self, inner: &mut Inner<TcpStream>) -> Result<()> {
        if inner.transport.is_connected() {
            debug!("Already connected");
            return Ok(());
        }

        match inner
            .transport
            .connect(&self.host, self.port, self.timeout)
            .await
        {
            Ok(()) => {
                inner.in_flight = false;
                self.metrics.connection_established();
                self.set_state(ConnectionState::Connected);
                info!("Connected to RCON server");
                Ok(())
            }
            Err(e) => {
                self.metrics.connection_error();
                warn!(error = %e, "Failed to connect to RCON server");
                Err(e)
            }
        }
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn build(
        host: String,
        port: u16,
        password: String,
        timeout: Option<Duration>,
        transport: Transport<S>,
    ) -> Self {
        let state = if transport.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };

        Self {
            host,
            port,
            password,
            timeout,
            state: AtomicU8::new(state.as_u8()),
            inner: Mutex::new(Inner {
                transport,
                in_flight: false,
            }),
            metrics: Metrics::new(),
        }
    }

    /// Wrap a stream that is already connected to an RCON server. The session
    /// starts in [`ConnectionState::Connected`]. It has no address of its own,
    /// so once closed it cannot reconnect.
    pub fn with_stream(stream: S, password: impl Into<String>) -> Self {
        let mut transport = Transport::new();
        transport.attach(stream);
        Self::build(String::new(), 0, password.into(), None, transport)
    }

    /// Authenticate with the configured password.
    pub async fn login(&self) -> Result<()> {
        self.login_with(&self.password).await
    }

    /// Authenticate with an explicit password.
    ///
    /// Requires [`ConnectionState::Connected`]; already being logged in is a
    /// no-op. A response whose id does not echo the login request is how the
    /// server refuses a password, so that case becomes
    /// [`RconError::InvalidCredentials`] and the session stays `Connected`.
    #[instrument(skip(self, password))]
    pub async fn login_with(&self, password: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;

        match self.state() {
            ConnectionState::Disconnected => return Err(RconError::NotConnected),
            ConnectionState::LoggedIn => {
                debug!("Already logged in");
                return Ok(());
            }
            ConnectionState::Connected => {}
        }

        self.metrics.login_attempt();
        let request = Packet::login(password);

        match self.exchange(&mut inner, &request).await {
            Ok(_) => {
                self.set_state(ConnectionState::LoggedIn);
                info!("Logged in to RCON server");
                Ok(())
            }
            Err(RconError::RequestIdMismatch { .. }) => {
                self.metrics.login_failed();
                warn!("RCON server refused the password");
                Err(RconError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    /// Run a command and return the response text. Arguments are appended to
    /// the command separated by single spaces.
    pub async fn run(&self, command: &str, args: &[&str]) -> Result<String> {
        self.run_raw(command, args).await.map(Packet::into_payload)
    }

    /// Run a command and return the whole response packet.
    #[instrument(skip(self, args), fields(command = %command))]
    pub async fn run_raw(&self, command: &str, args: &[&str]) -> Result<Packet> {
        let _timer = Timer::start("rcon_command");
        self.communicate(Packet::command(join_command(command, args)))
            .await
    }

    /// Send a prebuilt packet and return the response that echoes its id.
    /// Requires [`ConnectionState::LoggedIn`].
    pub async fn communicate(&self, packet: Packet) -> Result<Packet> {
        let mut inner = self.inner.lock().await;

        match self.state() {
            ConnectionState::Disconnected => return Err(RconError::NotConnected),
            ConnectionState::Connected => return Err(RconError::NotLoggedIn),
            ConnectionState::LoggedIn => {}
        }

        self.exchange(&mut inner, &packet).await
    }

    /// Release the connection. Safe to call in any state.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        self.close_locked(&mut inner).await;
    }

    async fn close_locked(&self, inner: &mut Inner<S>) {
        inner.transport.close().await;
        inner.in_flight = false;

        if self.state() != ConnectionState::Disconnected {
            self.set_state(ConnectionState::Disconnected);
            info!("Disconnected from RCON server");
            self.metrics.log_metrics();
        }
    }

    /// One write/read pair. Caller holds the lock and has checked the state.
    async fn exchange(&self, inner: &mut Inner<S>, request: &Packet) -> Result<Packet> {
        if inner.in_flight {
            warn!("Previous exchange was abandoned mid-flight, dropping connection");
            self.close_locked(inner).await;
            return Err(RconError::NotConnected);
        }

        request.check_size()?;
        let frame = request.to_frame();
        let frame_len = frame.len() as u64;
        debug!(
            request_id = request.request_id(),
            kind = ?request.kind(),
            bytes = frame_len,
            "Sending packet"
        );

        inner.in_flight = true;
        if let Err(e) = inner.transport.write_frame(frame).await {
            return Err(self.connection_lost(inner, e).await);
        }
        self.metrics.packet_sent(frame_len);

        let body = match inner.transport.read_frame().await {
            Ok(body) => body,
            Err(e) => return Err(self.connection_lost(inner, e).await),
        };
        inner.in_flight = false;
        self.metrics.packet_received(body.len() as u64);

        let response = Packet::decode(&body).inspect_err(|e| {
            self.metrics.invalid_frame();
            warn!(error = %e, "Received malformed packet");
        })?;

        debug!(
            request_id = response.request_id(),
            kind = ?response.kind(),
            bytes = body.len(),
            "Received packet"
        );

        if response.request_id() != request.request_id() {
            self.metrics.id_mismatch();
            warn!(
                sent = request.request_id(),
                received = response.request_id(),
                "Response id does not match request"
            );
            return Err(RconError::RequestIdMismatch {
                sent: request.request_id(),
                received: response.request_id(),
            });
        }

        Ok(response)
    }

    /// A transport failure leaves frame boundaries unknown; drop the socket.
    async fn connection_lost(&self, inner: &mut Inner<S>, err: RconError) -> RconError {
        self.metrics.connection_error();
        if err.is_connection_loss() {
            info!(error = %err, "Server closed the connection");
        } else {
            warn!(error = %err, "Connection lost during exchange");
        }
        self.close_locked(inner).await;
        err
    }
}

/// `command` followed by each argument, separated by single spaces.
fn join_command(command: &str, args: &[&str]) -> String {
    let mut text = String::with_capacity(
        command.len() + args.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    text.push_str(command);
    for arg in args {
        text.push(' ');
        text.push_str(arg);
    }
    text
}
