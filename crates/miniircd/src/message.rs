//! Line-to-(prefix, verb, params) parsing.
//!
//! Grammar (simplified from RFC 2812 §2.3.1, to the rules this server
//! actually enforces on inbound lines):
//!
//! ```text
//! message = [ ":" prefix SPACE ] verb *( SPACE param ) [ SPACE ":" trailing ]
//! ```
//!
//! A verb with no parameters, a prefix with no following space (malformed),
//! and a completely empty line are all handled explicitly below.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_till, take_while1},
    character::complete::space0,
    combinator::opt,
};

use crate::errors::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<String>,
    pub verb: String,
    pub params: Vec<String>,
}

fn is_space(c: char) -> bool {
    c == ' '
}

fn not_space(c: char) -> bool {
    c != ' '
}

/// `:prefix ` — consumed only when the line starts with `:`.
fn prefix(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag(":").parse(input)?;
    let (rest, prefix) = take_till(is_space).parse(rest)?;
    let (rest, _) = tag(" ").parse(rest)?;
    Ok((rest, prefix))
}

/// One space-delimited token (a verb or a non-trailing parameter).
fn token(input: &str) -> IResult<&str, &str> {
    take_while1(not_space).parse(input)
}

/// The trailing `:`-prefixed parameter: everything after the colon,
/// spaces included.
fn trailing(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag(":").parse(input)?;
    Ok(("", rest))
}

/// Parse one line (CRLF already stripped) into prefix/verb/params.
///
/// Returns [`ProtocolError::EmptyLine`] for a blank line (silently ignored
/// by the framer) and [`ProtocolError::MalformedPrefix`] when a `:prefix`
/// has no following space, matching §4.2 rule 2.
pub fn parse(line: &str) -> Result<Message, ProtocolError> {
    let (rest, _) = space0::<_, nom::error::Error<&str>>(line).unwrap_or((line, ""));
    if rest.is_empty() {
        return Err(ProtocolError::EmptyLine);
    }

    let (rest, prefix) = if rest.starts_with(':') {
        match prefix(rest) {
            Ok((rest, prefix)) => (rest, Some(prefix.to_string())),
            Err(_) => return Err(ProtocolError::MalformedPrefix),
        }
    } else {
        (rest, None)
    };

    let (rest, _) = space0::<_, nom::error::Error<&str>>(rest).unwrap_or((rest, ""));
    if rest.is_empty() {
        return Err(ProtocolError::EmptyLine);
    }

    let (mut rest, verb) = token(rest).map_err(|_: nom::Err<nom::error::Error<&str>>| {
        ProtocolError::EmptyLine
    })?;
    let verb = verb.to_uppercase();

    let mut params = Vec::new();
    loop {
        let (after_space, _) = space0::<_, nom::error::Error<&str>>(rest).unwrap_or((rest, ""));
        if after_space.is_empty() {
            break;
        }
        if after_space.starts_with(':') {
            if let Ok((_, trail)) = trailing(after_space) {
                params.push(trail.to_string());
            }
            break;
        }
        match token(after_space) {
            Ok((next, param)) => {
                params.push(param.to_string());
                rest = next;
            }
            Err(_) => break,
        }
    }

    Ok(Message {
        prefix,
        verb,
        params,
    })
}

/// Render a `Message` back to wire form, used by the parser round-trip test.
#[cfg(test)]
fn serialize(message: &Message) -> String {
    let mut out = String::new();
    if let Some(prefix) = &message.prefix {
        out.push(':');
        out.push_str(prefix);
        out.push(' ');
    }
    out.push_str(&message.verb);
    if let Some((last, init)) = message.params.split_last() {
        for param in init {
            out.push(' ');
            out.push_str(param);
        }
        out.push(' ');
        out.push(':');
        out.push_str(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verb_only() {
        let message = parse("PING").unwrap();
        assert_eq!(message.verb, "PING");
        assert!(message.prefix.is_none());
        assert!(message.params.is_empty());
    }

    #[test]
    fn uppercases_verb() {
        let message = parse("nick alice").unwrap();
        assert_eq!(message.verb, "NICK");
        assert_eq!(message.params, vec!["alice"]);
    }

    #[test]
    fn parses_prefix_verb_and_params() {
        let message = parse(":alice!a@h PRIVMSG #chat :hi all").unwrap();
        assert_eq!(message.prefix, Some("alice!a@h".to_string()));
        assert_eq!(message.verb, "PRIVMSG");
        assert_eq!(message.params, vec!["#chat", "hi all"]);
    }

    #[test]
    fn trailing_param_preserves_embedded_spaces() {
        let message = parse("PRIVMSG #chat :this has   spaces").unwrap();
        assert_eq!(message.params[1], "this has   spaces");
    }

    #[test]
    fn malformed_prefix_with_no_following_space_is_rejected() {
        assert_eq!(parse(":onlyprefix"), Err(ProtocolError::MalformedPrefix));
    }

    #[test]
    fn empty_line_is_rejected() {
        assert_eq!(parse(""), Err(ProtocolError::EmptyLine));
        assert_eq!(parse("   "), Err(ProtocolError::EmptyLine));
    }

    #[test]
    fn user_params_keep_middle_tokens_separate_from_trailing() {
        let message = parse("USER alice 0 * :Alice Example").unwrap();
        assert_eq!(message.params, vec!["alice", "0", "*", "Alice Example"]);
    }

    #[test]
    fn round_trip_is_stable() {
        let cases = [
            "PING",
            "NICK alice",
            "USER alice 0 * :Alice Example",
            ":alice!a@h PRIVMSG #chat :hi all",
        ];
        for case in cases {
            let parsed = parse(case).unwrap();
            let reserialized = serialize(&parsed);
            let reparsed = parse(&reserialized).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }
}
