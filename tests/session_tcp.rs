//! End-to-end session lifecycle against a local RCON server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{closed_port, spawn_server, ServerOptions, HANGUP, PASSWORD, ROSTER};
use rcon_protocol::commands::{AdminCommands, ChatCommands, InfoCommands};
use rcon_protocol::config::{ClientConfig, LoggingConfig};
use rcon_protocol::utils::logging;
use rcon_protocol::{ConnectionState, PacketType, RconError, Session};
use std::net::SocketAddr;
use std::time::Duration;

fn session_for(addr: SocketAddr, password: &str) -> Session {
    Session::new(
        addr.ip().to_string(),
        addr.port(),
        password,
        Some(Duration::from_secs(2)),
    )
}

#[tokio::test]
async fn test_full_lifecycle() {
    logging::try_init(&LoggingConfig::default());

    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    assert_eq!(session.state(), ConnectionState::Disconnected);

    session.connect().await.unwrap();
    assert_eq!(session.state(), ConnectionState::Connected);
    assert_eq!(session.peer_addr().await, Some(addr));
    assert!(matches!(
        session.run("listplayers", &[]).await,
        Err(RconError::NotLoggedIn)
    ));

    session.login().await.unwrap();
    assert_eq!(session.state(), ConnectionState::LoggedIn);

    assert_eq!(session.run("listplayers", &[]).await.unwrap(), ROSTER);
    assert_eq!(
        session.run("broadcast", &["hello", "world"]).await.unwrap(),
        "echo: broadcast hello world"
    );

    session.close().await;
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(matches!(
        session.run("listplayers", &[]).await,
        Err(RconError::NotConnected)
    ));

    session.close().await;
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, "not-the-password");
    session.connect().await.unwrap();

    assert!(matches!(
        session.login().await,
        Err(RconError::InvalidCredentials)
    ));
    assert_eq!(session.state(), ConnectionState::Connected);

    // Same connection, correct password
    session.login_with(PASSWORD).await.unwrap();
    assert_eq!(session.state(), ConnectionState::LoggedIn);

    let metrics = session.metrics();
    assert_eq!(metrics.logins_total, 2);
    assert_eq!(metrics.logins_failed, 1);
}

#[tokio::test]
async fn test_login_twice_is_noop() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    session.connect().await.unwrap();
    session.login().await.unwrap();
    session.login().await.unwrap();
    assert_eq!(session.metrics().logins_total, 1);
}

#[tokio::test]
async fn test_reconnect_requires_new_login() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    session.connect().await.unwrap();
    session.login().await.unwrap();

    session.reconnect().await.unwrap();
    assert_eq!(session.state(), ConnectionState::Connected);
    assert!(matches!(
        session.run("saveworld", &[]).await,
        Err(RconError::NotLoggedIn)
    ));

    session.login().await.unwrap();
    assert_eq!(session.run("saveworld", &[]).await.unwrap(), "World Saved");
    assert_eq!(session.metrics().connections_total, 2);
}

#[tokio::test]
async fn test_connect_is_idempotent() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    session.connect().await.unwrap();
    session.connect().await.unwrap();
    assert_eq!(session.metrics().connections_total, 1);
}

#[tokio::test]
async fn test_open_connects_and_logs_in() {
    let addr = spawn_server(ServerOptions::default()).await;
    let config = ClientConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        password: PASSWORD.to_string(),
        connect_timeout: Some(Duration::from_secs(2)),
    };

    let session = Session::open(&config).await.unwrap();
    assert!(session.is_logged_in());

    let raw = session.run_raw("saveworld", &[]).await.unwrap();
    assert_eq!(raw.kind(), PacketType::Response);
    assert_eq!(raw.payload(), "World Saved");
}

#[tokio::test]
async fn test_refused_connection_is_connect_error() {
    let addr = closed_port().await;
    let session = session_for(addr, PASSWORD);

    assert!(matches!(
        session.connect().await,
        Err(RconError::ConnectError(_))
    ));
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert_eq!(session.metrics().connection_errors, 1);
}

#[tokio::test]
async fn test_connect_timeout_is_reported() {
    // TEST-NET-1 never completes a handshake within a millisecond
    let session = Session::new("192.0.2.1", 27020, PASSWORD, Some(Duration::from_millis(1)));

    let result = tokio::time::timeout(Duration::from_secs(5), session.connect())
        .await
        .expect("connect must be bounded by its timeout");
    assert!(matches!(result, Err(RconError::ConnectTimedOut)));
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert_eq!(session.metrics().connection_errors, 1);
}

#[tokio::test]
async fn test_server_hangup_then_reconnect() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    session.connect().await.unwrap();
    session.login().await.unwrap();

    assert!(matches!(
        session.run(HANGUP, &[]).await,
        Err(RconError::ConnectionClosed)
    ));
    assert_eq!(session.state(), ConnectionState::Disconnected);

    session.reconnect().await.unwrap();
    session.login().await.unwrap();
    assert_eq!(session.run("saveworld", &[]).await.unwrap(), "World Saved");
}

#[tokio::test]
async fn test_command_helpers_over_tcp() {
    let addr = spawn_server(ServerOptions::default()).await;
    let session = session_for(addr, PASSWORD);
    session.connect().await.unwrap();
    session.login().await.unwrap();

    session.save_world().await.unwrap();
    session.broadcast("Restart soon").await.unwrap();
    session.chat(Some("Admin"), "hi").await.unwrap();

    let players = session.online_players().await.unwrap();
    let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    let log = session.game_log().await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].message, "Alice joined");
}
