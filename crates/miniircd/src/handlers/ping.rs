use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

pub async fn handle(_registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let target = client.nickname_or_placeholder().await;

    let Some(token) = params.first() else {
        client.send_line(replies::err_no_origin(&target));
        return HandlerOutcome::Continue;
    };

    let nick = client.nickname().await;
    client.send_line(replies::pong(&nick, token));
    HandlerOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_with_pong_echoing_the_token() {
        let registry = Registry::new(crate::config::Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        client.set_nickname("alice".to_string()).await;
        handle(&registry, &client, &["abc123".to_string()]).await;
        assert_eq!(rx.try_recv().unwrap(), ":alice PONG miniircd :abc123\r\n");
    }

    #[tokio::test]
    async fn missing_token_yields_no_origin_error() {
        let registry = Registry::new(crate::config::Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        handle(&registry, &client, &[]).await;
        assert_eq!(rx.try_recv().unwrap(), ":miniircd 409 * :No origin specified\r\n");
    }

    #[tokio::test]
    async fn unregistered_client_gets_raw_empty_nick_in_pong_not_the_placeholder() {
        let registry = Registry::new(crate::config::Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        handle(&registry, &client, &["abc123".to_string()]).await;
        assert_eq!(rx.try_recv().unwrap(), ": PONG miniircd :abc123\r\n");
    }
}
