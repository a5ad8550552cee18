use crate::client::ClientHandle;
use crate::handlers::HandlerOutcome;
use crate::registry::Registry;
use crate::replies;

pub async fn handle(registry: &Registry, client: &ClientHandle, params: &[String]) -> HandlerOutcome {
    let target = client.nickname_or_placeholder().await;

    let Some(channel_name) = params.first() else {
        client.send_line(replies::err_need_more_params(&target, "JOIN"));
        return HandlerOutcome::Continue;
    };

    if !channel_name.starts_with('#') {
        client.send_line(replies::err_invalid_channel_name(&target, channel_name));
        return HandlerOutcome::Continue;
    }

    registry.get_or_create_channel(channel_name);

    let already_member = registry
        .with_channel(channel_name, |channel| channel.is_member(client.id))
        .unwrap_or(false);
    if already_member {
        return HandlerOutcome::Continue;
    }

    registry.with_channel(channel_name, |channel| channel.add_member(client.id));

    let nick = client.nickname().await;
    let join_line = replies::join_broadcast(&nick, channel_name);
    registry.broadcast_to_channel(channel_name, &join_line, None);

    client.send_line(replies::no_topic(&nick, channel_name));

    let member_ids = registry
        .with_channel(channel_name, |channel| channel.member_ids_sorted())
        .unwrap_or_default();
    let mut names = Vec::with_capacity(member_ids.len());
    for id in member_ids {
        if let Some(member) = registry.get_client(id) {
            names.push(member.nickname().await);
        }
    }
    client.send_line(replies::names_reply(&nick, channel_name, &names));
    client.send_line(replies::end_of_names(&nick, channel_name));

    HandlerOutcome::Continue
}
