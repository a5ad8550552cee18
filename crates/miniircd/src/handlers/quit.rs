use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

/// Broadcasts the QUIT line to every other client and marks this client
/// disconnecting; per-channel teardown (PART broadcasts, empty-channel
/// destruction) happens separately once the connection driver notices the
/// disconnect (§4.5) — QUIT itself only performs the broadcast.
pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let nick = client.nickname().await;
    let reason = params.first().map(String::as_str);
    let line = replies::quit_broadcast(&nick, reason);
    registry.broadcast_to_all(&line, Some(client.id)).await;
    client.mark_disconnecting();
    HandlerOutcome::Disconnect
}
