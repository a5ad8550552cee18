use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

/// Routing shared by PRIVMSG and NOTICE (§4.4): resolve `target` to either a
/// channel or a nickname and deliver `text`. `suppress_errors` makes NOTICE's
/// silent-drop behavior a parameter rather than a copy of this function.
pub(crate) async fn route(
    registry: &Registry,
    client: &ClientHandle,
    target: &str,
    text: &str,
    suppress_errors: bool,
    format_line: impl Fn(&str, &str, &str) -> String,
) {
    let nick = client.nickname_or_placeholder().await;
    let sender_nick = client.nickname().await;

    if target.starts_with('#') {
        if !registry.channel_exists(target) {
            if !suppress_errors {
                client.send_line(replies::err_no_such_nick(&nick, target));
            }
            return;
        }
        let is_member = registry
            .with_channel(target, |channel| channel.is_member(client.id))
            .unwrap_or(false);
        if !is_member {
            if !suppress_errors {
                client.send_line(replies::err_not_on_channel(&nick, target));
            }
            return;
        }
        let line = format_line(&sender_nick, target, text);
        registry.broadcast_to_channel(target, &line, Some(client.id));
    } else {
        match registry.find_by_nickname(target).await {
            Some(recipient) => {
                let line = format_line(&sender_nick, target, text);
                recipient.send_line(line);
            }
            None => {
                if !suppress_errors {
                    client.send_line(replies::err_no_such_nick(&nick, target));
                }
            }
        }
    }
}

pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let nick = client.nickname_or_placeholder().await;

    if params.len() < 2 {
        client.send_line(replies::err_need_more_params(&nick, "PRIVMSG"));
        return HandlerOutcome::Continue;
    }

    let target = &params[0];
    let text = &params[1];
    if text.is_empty() {
        client.send_line(replies::err_no_text_to_send(&nick));
        return HandlerOutcome::Continue;
    }

    route(registry, client, target, text, false, replies::privmsg).await;
    HandlerOutcome::Continue
}
