//! One module per verb, each exposing a `handle` function with the same
//! shape: `(&Registry, &ClientHandle, &[String]) -> HandlerOutcome`.
//!
//! Numeric error replies go straight out through `client.send_line`;
//! broadcasts go through `Registry`. Nothing here ever panics on malformed
//! input — absent/short parameters produce a numeric reply, not an `Err`.

mod join;
mod nick;
mod notice;
mod part;
mod ping;
mod privmsg;
mod quit;
mod user;

pub use join::handle as handle_join;
pub use nick::handle as handle_nick;
pub use notice::handle as handle_notice;
pub use part::handle as handle_part;
pub use ping::handle as handle_ping;
pub use privmsg::handle as handle_privmsg;
pub use quit::handle as handle_quit;
pub use user::handle as handle_user;

/// What the connection driver should do once a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Continue,
    Disconnect,
}

/// Emits the registration burst (§4.3) the first time both NICK and USER
/// have landed. Shared by the NICK and USER handlers, since either one can
/// be the transition that completes registration.
pub(crate) async fn maybe_complete_registration(
    registry: &crate::registry::Registry,
    client: &crate::client::ClientHandle,
) {
    if client.try_complete_registration().await {
        let nick = client.nickname().await;
        for line in crate::replies::welcome_burst(&nick, &registry.config.motd) {
            client.send_line(line);
        }
    }
}
