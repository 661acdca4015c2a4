//! Adverse delivery: slow, fragmented replies.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{spawn_server, ServerOptions, PASSWORD, ROSTER};
use rcon_protocol::commands::InfoCommands;
use rcon_protocol::Session;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_fragmented_replies_are_reassembled() {
    let addr = spawn_server(ServerOptions {
        reply_delay: None,
        chunk_delay: Some(Duration::from_millis(1)),
    })
    .await;

    let session = Session::new(addr.ip().to_string(), addr.port(), PASSWORD, None);
    session.connect().await.unwrap();
    session.login().await.unwrap();

    assert_eq!(session.run("listplayers", &[]).await.unwrap(), ROSTER);
    assert_eq!(session.online_players().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_external_deadline_bounds_slow_reply() {
    let addr = spawn_server(ServerOptions {
        reply_delay: Some(Duration::from_millis(500)),
        chunk_delay: None,
    })
    .await;

    let session = Session::new(addr.ip().to_string(), addr.port(), PASSWORD, None);
    session.connect().await.unwrap();
    session.login().await.unwrap();

    // Reads carry no timeout of their own; the caller imposes one
    let result = timeout(Duration::from_millis(50), session.run("saveworld", &[])).await;
    assert!(result.is_err(), "slow reply should exceed the deadline");

    // The abandoned response could be misattributed, so the session drops the socket
    assert!(matches!(
        session.run("saveworld", &[]).await,
        Err(rcon_protocol::RconError::NotConnected)
    ));

    session.reconnect().await.unwrap();
    session.login().await.unwrap();
    assert_eq!(session.run("saveworld", &[]).await.unwrap(), "World Saved");
}
