use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let target = client.nickname_or_placeholder().await;

    let Some(channel_name) = params.first() else {
        client.send_line(replies::err_need_more_params(&target, "PART"));
        return HandlerOutcome::Continue;
    };

    if !registry.channel_exists(channel_name) {
        client.send_line(replies::err_no_such_channel(&target, channel_name));
        return HandlerOutcome::Continue;
    }

    let is_member = registry
        .with_channel(channel_name, |channel| channel.is_member(client.id))
        .unwrap_or(false);
    if !is_member {
        client.send_line(replies::err_not_on_channel(&target, channel_name));
        return HandlerOutcome::Continue;
    }

    registry.with_channel(channel_name, |channel| channel.remove_member(client.id));

    let nick = client.nickname().await;
    let part_line = replies::part_broadcast(&nick, channel_name);
    registry.broadcast_to_channel(channel_name, &part_line, Some(client.id));

    registry.drop_channel_if_empty(channel_name);
    HandlerOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn registered_client(registry: &Registry, nick: &str) -> (ClientHandle, tokio::sync::mpsc::Receiver<String>) {
        let (client, rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        client.set_nickname(nick.to_string()).await;
        registry.register_client(client.clone());
        (client, rx)
    }

    #[tokio::test]
    async fn parting_the_last_member_destroys_the_channel() {
        let registry = Registry::new(crate::config::Config::default());
        let (alice, _rx) = registered_client(&registry, "alice").await;
        registry.get_or_create_channel("#chat");
        registry.with_channel("#chat", |c| c.add_member(alice.id));

        handle(&registry, &alice, &["#chat".to_string()]).await;
        assert!(!registry.channel_exists("#chat"));
    }

    #[tokio::test]
    async fn parting_a_channel_you_are_not_on_is_442() {
        let registry = Registry::new(crate::config::Config::default());
        let (alice, mut rx) = registered_client(&registry, "alice").await;
        registry.get_or_create_channel("#chat");

        handle(&registry, &alice, &["#chat".to_string()]).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            ":miniircd 442 alice #chat :You're not on that channel\r\n"
        );
    }

    #[tokio::test]
    async fn parting_a_nonexistent_channel_is_403() {
        let registry = Registry::new(crate::config::Config::default());
        let (alice, mut rx) = registered_client(&registry, "alice").await;
        handle(&registry, &alice, &["#ghost".to_string()]).await;
        assert_eq!(rx.try_recv().unwrap(), ":miniircd 403 alice #ghost :No such channel\r\n");
    }
}
