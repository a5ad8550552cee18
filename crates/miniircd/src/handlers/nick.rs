use crate::client::ClientHandle;
use crate::handlers::{HandlerOutcome, maybe_complete_registration};
use crate::registry::Registry;
use crate::replies;

/// 1–9 characters, first alphabetic, rest alphanumeric/`-`/`_` (§4.4 NICK).
fn is_valid_nickname(nick: &str) -> bool {
    if nick.is_empty() || nick.len() > 9 {
        return false;
    }
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let target = client.nickname_or_placeholder().await;

    let Some(nick) = params.first() else {
        client.send_line(replies::err_no_nickname_given(&target));
        return HandlerOutcome::Continue;
    };

    if !is_valid_nickname(nick) {
        client.send_line(replies::err_erroneous_nickname(&target, nick));
        return HandlerOutcome::Continue;
    }

    if registry.nickname_in_use(nick, client.id).await {
        client.send_line(replies::err_nickname_in_use(&target, nick));
        return HandlerOutcome::Continue;
    }

    let was_registered = client.is_registered().await;
    let previous_nick = client.set_nickname(nick.clone()).await;

    if was_registered && !previous_nick.is_empty() {
        let line = replies::nick_change(&previous_nick, nick);
        registry.broadcast_to_all(&line, Some(client.id)).await;
    }

    maybe_complete_registration(registry, client).await;
    HandlerOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_short_alpha_leading_nicknames() {
        assert!(is_valid_nickname("alice"));
        assert!(is_valid_nickname("a"));
        assert!(is_valid_nickname("a_b-2"));
    }

    #[test]
    fn rejects_digit_leading_and_overlong_nicknames() {
        assert!(!is_valid_nickname("2cool"));
        assert!(!is_valid_nickname(""));
        assert!(!is_valid_nickname("waytoolongnick"));
    }

    #[tokio::test]
    async fn nick_collision_leaves_second_client_unnamed() {
        let registry = Registry::new(crate::config::Config::default());
        let (alice, _rx1) = ClientHandle::new(registry.next_client_id(), "h".into());
        registry.register_client(alice.clone());
        handle(&registry, &alice, &["alice".to_string()]).await;

        let (bob, _rx2) = ClientHandle::new(registry.next_client_id(), "h".into());
        registry.register_client(bob.clone());
        handle(&registry, &bob, &["alice".to_string()]).await;

        assert_eq!(bob.nickname().await, "");
    }
}
