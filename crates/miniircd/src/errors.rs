use thiserror::Error;

/// Errors that can occur while interpreting one line of client input.
///
/// These are always recoverable: a malformed line is logged and dropped,
/// the connection stays open, and nothing propagates past the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("malformed prefix: no space after ':prefix'")]
    MalformedPrefix,

    #[error("empty command line")]
    EmptyLine,
}

/// Fatal, process-ending errors: bind/listen/config failures.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to load configuration from {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to bind listening socket on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to listen on {addr}: {source}")]
    Listen {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
