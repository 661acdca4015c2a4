//! In-process RCON server for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use futures::{SinkExt, StreamExt};
use rcon_protocol::core::codec::FrameCodec;
use rcon_protocol::{Packet, PacketType};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::sleep;
use tokio_util::codec::Framed;

pub const PASSWORD: &str = "letmein";

/// Command that makes the server hang up instead of answering
pub const HANGUP: &str = "hangup";

pub const ROSTER: &str = "\n0. Alice, 76561198000000001\n1. Bob, 76561198000000002\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    /// Pause before each reply
    pub reply_delay: Option<Duration>,
    /// Deliver replies three bytes at a time with this pause between writes
    pub chunk_delay: Option<Duration>,
}

/// Start a server on an ephemeral port; it accepts connections until the
/// test runtime shuts down.
pub async fn spawn_server(options: ServerOptions) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve(stream, options));
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn respond(command: &str) -> String {
    match command {
        "listplayers" => ROSTER.to_string(),
        "getgamelog" => "2024.03.01_12.30.45: Alice joined\n".to_string(),
        "saveworld" => "World Saved".to_string(),
        other => format!("echo: {other}"),
    }
}

async fn serve(stream: TcpStream, options: ServerOptions) {
    let mut framed = Framed::new(stream, FrameCodec);
    let mut authenticated = false;

    while let Some(Ok(body)) = framed.next().await {
        let Ok(request) = Packet::decode(&body) else {
            return;
        };

        let reply = match request.kind() {
            PacketType::Login if request.payload() == PASSWORD => {
                authenticated = true;
                Packet::new(request.request_id(), PacketType::Command, "")
            }
            // Refused logins answer with id -1
            PacketType::Login => Packet::new(u32::MAX, PacketType::Command, ""),
            PacketType::Command if authenticated && request.payload() != HANGUP => Packet::new(
                request.request_id(),
                PacketType::Response,
                respond(request.payload()),
            ),
            _ => return,
        };

        if let Some(delay) = options.reply_delay {
            sleep(delay).await;
        }

        let frame = reply.to_frame();
        match options.chunk_delay {
            None => {
                if framed.send(frame).await.is_err() {
                    return;
                }
            }
            Some(delay) => {
                let stream = framed.get_mut();
                for chunk in frame.chunks(3) {
                    if stream.write_all(chunk).await.is_err() || stream.flush().await.is_err() {
                        return;
                    }
                    sleep(delay).await;
                }
            }
        }
    }
}
