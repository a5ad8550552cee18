//! Numeric reply codes and wire-protocol constants.
//!
//! Codes are the subset of RFC 2812 §5 this server actually emits.

pub const SERVER_NAME: &str = "miniircd";

/// Maximum bytes read from a socket per readable event, and the RFC 2812
/// line-length cap (including the trailing CRLF).
pub const BUFFER_SIZE: usize = 512;

pub const RPL_WELCOME: u16 = 001;
pub const RPL_NOTOPIC: u16 = 332;
pub const RPL_NAMREPLY: u16 = 353;
pub const RPL_ENDOFNAMES: u16 = 366;
pub const RPL_MOTD: u16 = 372;
pub const RPL_MOTDSTART: u16 = 375;
pub const RPL_ENDOFMOTD: u16 = 376;

pub const ERR_NOSUCHNICK: u16 = 401;
pub const ERR_NOSUCHCHANNEL: u16 = 403;
pub const ERR_NOORIGIN: u16 = 409;
pub const ERR_NOTEXTTOSEND: u16 = 412;
pub const ERR_UNKNOWNCOMMAND: u16 = 421;
pub const ERR_NONICKNAMEGIVEN: u16 = 431;
pub const ERR_ERRONEUSNICKNAME: u16 = 432;
pub const ERR_NICKNAMEINUSE: u16 = 433;
pub const ERR_NOTONCHANNEL: u16 = 442;
pub const ERR_NEEDMOREPARAMS: u16 = 461;
pub const ERR_ALREADYREGISTRED: u16 = 462;
pub const ERR_NOSUCHCHANNELNAME: u16 = 476;
