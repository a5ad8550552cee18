//! Numeric-reply and command-line formatting, per §4.4.
//!
//! Every function here returns a fully CRLF-terminated line ready to hand
//! to [`crate::client::ClientHandle::send_line`].

use crate::constants::*;

fn numeric(code: u16, target: &str, rest: &str) -> String {
    format!(":{SERVER_NAME} {code:03} {target} {rest}\r\n")
}

pub fn welcome_burst(nick: &str, motd: &str) -> Vec<String> {
    vec![
        numeric(
            RPL_WELCOME,
            nick,
            ":Welcome to the mini IRC server",
        ),
        numeric(
            RPL_MOTDSTART,
            nick,
            &format!(":- {SERVER_NAME} Message of the day - "),
        ),
        numeric(RPL_MOTD, nick, &format!(":- {motd}")),
        numeric(RPL_ENDOFMOTD, nick, ":End of /MOTD command."),
    ]
}

pub fn err_no_nickname_given(target: &str) -> String {
    numeric(ERR_NONICKNAMEGIVEN, target, ":No nickname given")
}

pub fn err_erroneous_nickname(target: &str, nick: &str) -> String {
    numeric(ERR_ERRONEUSNICKNAME, target, &format!("{nick} :Erroneous nickname"))
}

pub fn err_nickname_in_use(target: &str, nick: &str) -> String {
    numeric(
        ERR_NICKNAMEINUSE,
        target,
        &format!("{nick} :Nickname is already in use"),
    )
}

pub fn nick_change(old_nick: &str, new_nick: &str) -> String {
    format!(":{old_nick} NICK :{new_nick}\r\n")
}

pub fn err_need_more_params(target: &str, command: &str) -> String {
    numeric(
        ERR_NEEDMOREPARAMS,
        target,
        &format!("{command} :Not enough parameters"),
    )
}

pub fn err_already_registered(target: &str) -> String {
    numeric(ERR_ALREADYREGISTRED, target, ":You may not reregister")
}

pub fn err_no_origin(target: &str) -> String {
    numeric(ERR_NOORIGIN, target, ":No origin specified")
}

pub fn pong(nick: &str, token: &str) -> String {
    format!(":{nick} PONG {SERVER_NAME} :{token}\r\n")
}

pub fn err_invalid_channel_name(target: &str, channel: &str) -> String {
    numeric(
        ERR_NOSUCHCHANNELNAME,
        target,
        &format!("{channel} :Invalid channel name"),
    )
}

pub fn join_broadcast(nick: &str, channel: &str) -> String {
    format!(":{nick} JOIN :{channel}\r\n")
}

pub fn no_topic(target: &str, channel: &str) -> String {
    numeric(RPL_NOTOPIC, target, &format!("{channel} :No topic is set"))
}

pub fn names_reply(target: &str, channel: &str, names: &[String]) -> String {
    let joined = names.iter().map(|n| format!("{n} ")).collect::<String>();
    numeric(RPL_NAMREPLY, target, &format!("= {channel} :{joined}"))
}

pub fn end_of_names(target: &str, channel: &str) -> String {
    numeric(
        RPL_ENDOFNAMES,
        target,
        &format!("{channel} :End of /NAMES list."),
    )
}

pub fn err_no_such_channel(target: &str, channel: &str) -> String {
    numeric(
        ERR_NOSUCHCHANNEL,
        target,
        &format!("{channel} :No such channel"),
    )
}

pub fn err_not_on_channel(target: &str, channel: &str) -> String {
    numeric(
        ERR_NOTONCHANNEL,
        target,
        &format!("{channel} :You're not on that channel"),
    )
}

pub fn part_broadcast(nick: &str, channel: &str) -> String {
    format!(":{nick} PART {channel}\r\n")
}

pub fn err_no_such_nick(target: &str, target_name: &str) -> String {
    numeric(
        ERR_NOSUCHNICK,
        target,
        &format!("{target_name} :No such nick/channel"),
    )
}

pub fn err_no_text_to_send(target: &str) -> String {
    numeric(ERR_NOTEXTTOSEND, target, ":No text to send")
}

pub fn privmsg(nick: &str, target: &str, text: &str) -> String {
    format!(":{nick} PRIVMSG {target} :{text}\r\n")
}

pub fn notice(nick: &str, target: &str, text: &str) -> String {
    format!(":{nick} NOTICE {target} :{text}\r\n")
}

/// §9 Design Notes: the reason is formatted with two colons, reproducing
/// the originally observed (non-RFC) behavior rather than RFC 2812's single
/// `:<reason>`.
pub fn quit_broadcast(nick: &str, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!(":{nick} QUIT :Quit :{reason}\r\n"),
        None => format!(":{nick} QUIT :Quit\r\n"),
    }
}

pub fn err_unknown_command(target: &str, command: &str) -> String {
    numeric(
        ERR_UNKNOWNCOMMAND,
        target,
        &format!("{command} :Unknown command"),
    )
}

pub fn welcome_notice() -> String {
    format!(":{SERVER_NAME} NOTICE AUTH :Welcome to {SERVER_NAME}!\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_burst_matches_s1_scenario() {
        let lines = welcome_burst("alice", "Welcome to the mini IRC server!");
        assert_eq!(
            lines[0],
            ":miniircd 001 alice :Welcome to the mini IRC server\r\n"
        );
        assert_eq!(
            lines[1],
            ":miniircd 375 alice :- miniircd Message of the day - \r\n"
        );
        assert_eq!(
            lines[2],
            ":miniircd 372 alice :- Welcome to the mini IRC server!\r\n"
        );
        assert_eq!(lines[3], ":miniircd 376 alice :End of /MOTD command.\r\n");
    }

    #[test]
    fn nickname_in_use_matches_s2_scenario() {
        assert_eq!(
            err_nickname_in_use("*", "alice"),
            ":miniircd 433 * alice :Nickname is already in use\r\n"
        );
    }

    #[test]
    fn names_reply_matches_s3_scenario() {
        assert_eq!(
            names_reply("alice", "#chat", &["alice".to_string()]),
            ":miniircd 353 alice = #chat :alice \r\n"
        );
    }

    #[test]
    fn quit_with_reason_uses_double_colon_format() {
        assert_eq!(
            quit_broadcast("alice", Some("bye")),
            ":alice QUIT :Quit :bye\r\n"
        );
    }

    #[test]
    fn quit_without_reason_omits_the_second_colon_clause() {
        assert_eq!(quit_broadcast("alice", None), ":alice QUIT :Quit\r\n");
    }
}
