use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::handlers::privmsg::route;
use crate::registry::Registry;
use crate::replies;

/// Identical routing to PRIVMSG, but every routing failure is silently
/// dropped — NOTICE never produces a numeric error reply (§4.4).
pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    if params.len() < 2 {
        return HandlerOutcome::Continue;
    }
    let target = &params[0];
    let text = &params[1];
    if text.is_empty() {
        return HandlerOutcome::Continue;
    }

    route(registry, client, target, text, true, replies::notice).await;
    HandlerOutcome::Continue
}
