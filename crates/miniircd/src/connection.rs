//! Drives one accepted connection: reader task frames and dispatches lines,
//! writer task drains the client's outbound queue. Grounded on the
//! reader/writer task split this codebase already used for client
//! connections, simplified to a single bounded mpsc channel per client
//! (no per-channel broadcast subscriptions — broadcasts are delivered by
//! the registry looking up each member's `ClientHandle` directly).

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::client::ClientHandle;
use crate::dispatch;
use crate::framer::{LineFramer, READ_CHUNK};
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

pub async fn handle_connection(socket: TcpStream, addr: SocketAddr, registry: Registry) {
    log::info!("accepted connection from {addr}");

    let (mut read_half, write_half) = socket.into_split();
    let client_id = registry.next_client_id();
    let (client, outbound_rx) = ClientHandle::new(client_id, addr.ip().to_string());
    registry.register_client(client.clone());

    client.send_line(replies::welcome_notice());

    let writer_task = tokio::spawn(writer_loop(write_half, outbound_rx));

    let mut framer = LineFramer::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match read_half.read(&mut buf).await {
            Ok(0) => {
                log::info!("client {client_id}: connection closed by peer");
                break;
            }
            Ok(n) => n,
            Err(err) => {
                log::warn!("client {client_id}: read error: {err}");
                break;
            }
        };

        let lines = framer.feed(&buf[..n]);
        let mut should_disconnect = false;
        for line in lines {
            log::debug!("client {client_id}: received {line:?}");
            if dispatch::handle_line(&registry, &client, &line).await == HandlerOutcome::Disconnect {
                should_disconnect = true;
                break;
            }
        }
        if should_disconnect || client.is_disconnecting() {
            break;
        }
    }

    client.mark_disconnecting();
    teardown(&registry, &client).await;
    writer_task.abort();
}

async fn writer_loop(mut write_half: tokio::net::tcp::OwnedWriteHalf, mut rx: mpsc::Receiver<String>) {
    while let Some(line) = rx.recv().await {
        if let Err(err) = write_half.write_all(line.as_bytes()).await {
            log::warn!("write error: {err}");
            break;
        }
    }
}

/// §4.5: remove the client from every channel it belongs to, announce its
/// departure to the remaining members, destroy any channel left empty, then
/// drop it from the registry.
async fn teardown(registry: &Registry, client: &ClientHandle) {
    let nick = client.nickname_or_placeholder().await;
    for channel_name in registry.channels_for(client.id) {
        registry.with_channel(&channel_name, |channel| channel.remove_member(client.id));
        let line = replies::part_broadcast(&nick, &channel_name);
        registry.broadcast_to_channel(&channel_name, &line, Some(client.id));
        registry.drop_channel_if_empty(&channel_name);
    }
    registry.remove_client(client.id);
    log::info!("client {}: torn down", client.id);
}
