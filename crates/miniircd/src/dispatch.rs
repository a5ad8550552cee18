//! Verb → handler dispatch (§9 Design Notes: a table, not a long
//! conditional chain).

use crate::client::ClientHandle;
use crate::handlers::{self, HandlerOutcome};
use crate::message;
use crate::registry::Registry;
use crate::replies;

/// Parse and dispatch one already-framed line. A malformed line (empty,
/// or a `:prefix` with no following space) is logged and silently dropped,
/// matching §4.2 rules 2/3 — it never reaches a handler or produces a reply.
pub async fn handle_line(registry: &Registry, client: &ClientHandle, line: &str) -> HandlerOutcome {
    let message = match message::parse(line) {
        Ok(message) => message,
        Err(err) => {
            log::debug!("client {}: dropping malformed line: {err}", client.id);
            return HandlerOutcome::Continue;
        }
    };

    match message.verb.as_str() {
        "NICK" => handlers::handle_nick(registry, client, &message.params).await,
        "USER" => handlers::handle_user(registry, client, &message.params).await,
        "PING" => handlers::handle_ping(registry, client, &message.params).await,
        "JOIN" => handlers::handle_join(registry, client, &message.params).await,
        "PART" => handlers::handle_part(registry, client, &message.params).await,
        "PRIVMSG" => handlers::handle_privmsg(registry, client, &message.params).await,
        "NOTICE" => handlers::handle_notice(registry, client, &message.params).await,
        "QUIT" => handlers::handle_quit(registry, client, &message.params).await,
        other => {
            let target = client.nickname_or_placeholder().await;
            client.send_line(replies::err_unknown_command(&target, other));
            HandlerOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn unknown_verb_yields_421() {
        let registry = Registry::new(Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        client.set_nickname("alice".to_string()).await;

        let outcome = handle_line(&registry, &client, "FOO bar").await;
        assert_eq!(outcome, HandlerOutcome::Continue);
        assert_eq!(rx.try_recv().unwrap(), ":miniircd 421 alice FOO :Unknown command\r\n");
    }

    #[tokio::test]
    async fn malformed_line_produces_no_reply_and_keeps_connection_open() {
        let registry = Registry::new(Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());

        let outcome = handle_line(&registry, &client, ":onlyprefix").await;
        assert_eq!(outcome, HandlerOutcome::Continue);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn quit_line_tells_the_driver_to_disconnect() {
        let registry = Registry::new(Config::default());
        let (client, _rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        client.set_nickname("alice".to_string()).await;
        registry.register_client(client.clone());

        let outcome = handle_line(&registry, &client, "QUIT :bye").await;
        assert_eq!(outcome, HandlerOutcome::Disconnect);
    }
}
