use crate::client::ClientHandle;
use crate::handlers::{HandlerOutcome, maybe_complete_registration};
use crate::registry::Registry;
use crate::replies;

pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let target = client.nickname_or_placeholder().await;

    if params.len() < 4 {
        client.send_line(replies::err_need_more_params(&target, "USER"));
        return HandlerOutcome::Continue;
    }

    if client.is_registered().await {
        client.send_line(replies::err_already_registered(&target));
        return HandlerOutcome::Continue;
    }

    // params[2] is the mode-or-servername field; this server ignores it.
    client
        .set_user_fields(params[0].clone(), params[1].clone(), params[3].clone())
        .await;

    maybe_complete_registration(registry, client).await;
    HandlerOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_completes_once_nick_and_user_are_both_set() {
        let registry = Registry::new(crate::config::Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        registry.register_client(client.clone());

        crate::handlers::handle_nick(&registry, &client, &["alice".to_string()]).await;
        handle(
            &registry,
            &client,
            &[
                "alice".to_string(),
                "0".to_string(),
                "*".to_string(),
                "Alice Example".to_string(),
            ],
        )
        .await;

        assert!(client.is_registered().await);
        let welcome = rx.try_recv().unwrap();
        assert!(welcome.starts_with(":miniircd 001 alice"));
    }

    #[tokio::test]
    async fn reregistering_is_rejected() {
        let registry = Registry::new(crate::config::Config::default());
        let (client, mut rx) = ClientHandle::new(registry.next_client_id(), "h".into());
        registry.register_client(client.clone());
        let params = vec![
            "alice".to_string(),
            "0".to_string(),
            "*".to_string(),
            "Alice".to_string(),
        ];
        crate::handlers::handle_nick(&registry, &client, &["alice".to_string()]).await;
        handle(&registry, &client, &params).await;
        for line in crate::replies::welcome_burst("alice", &registry.config.motd) {
            assert_eq!(rx.try_recv().unwrap(), line);
        }
        handle(&registry, &client, &params).await;
        assert_eq!(rx.try_recv().unwrap(), ":miniircd 462 alice :You may not reregister\r\n");
    }
}
