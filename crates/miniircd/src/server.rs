//! Socket setup and the accept loop (§4.7 Server shell).

use std::net::{IpAddr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::connection;
use crate::errors::ServerError;
use crate::registry::Registry;

const LISTEN_BACKLOG: i32 = 1024;

/// Builds and binds the listening socket by hand rather than going straight
/// through `TcpListener::bind`: a dual-stack IPv6 socket (accepting both v4
/// and v6 peers on one listener) needs `IPV6_V6ONLY` cleared before bind,
/// which `tokio::net::TcpListener` has no knob for.
fn bind_listener(config: &Config) -> Result<std::net::TcpListener, ServerError> {
    let ip: IpAddr = config
        .bind_address
        .parse()
        .map_err(|source: std::net::AddrParseError| ServerError::Bind {
            addr: format!("{}:{}", config.bind_address, config.port),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, source),
        })?;
    let addr = SocketAddr::new(ip, config.port);

    let domain = if addr.is_ipv6() { Domain::IPV6 } else { Domain::IPV4 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(|source| {
        ServerError::Bind {
            addr: addr.to_string(),
            source,
        }
    })?;

    if addr.is_ipv6() {
        // Best-effort: some platforms/addresses don't support dual-stack.
        let _ = socket.set_only_v6(false);
    }
    socket.set_reuse_address(true).map_err(|source| ServerError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    socket.bind(&addr.into()).map_err(|source| ServerError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    socket.listen(LISTEN_BACKLOG).map_err(|source| ServerError::Listen {
        addr: addr.to_string(),
        source,
    })?;
    socket.set_nonblocking(true).map_err(|source| ServerError::Listen {
        addr: addr.to_string(),
        source,
    })?;

    Ok(socket.into())
}

/// Binds the configured listening address. Split out from [`run`] so tests
/// can bind an ephemeral port (`config.port == 0`), learn the real address
/// `listener.local_addr()` picked, and drive [`serve`] directly.
pub fn bind(config: &Config) -> Result<TcpListener, ServerError> {
    let std_listener = bind_listener(config)?;
    TcpListener::from_std(std_listener).map_err(|source| ServerError::Listen {
        addr: format!("{}:{}", config.bind_address, config.port),
        source,
    })
}

/// Accepts connections on `listener` until the process is killed or the
/// listener is dropped; each accepted socket is handed to an independent
/// connection task (§4.6).
pub async fn serve(listener: TcpListener, registry: Registry) {
    loop {
        match listener.accept().await {
            Ok((socket, addr)) => {
                let registry = registry.clone();
                tokio::spawn(async move {
                    connection::handle_connection(socket, addr, registry).await;
                });
            }
            Err(err) => {
                log::warn!("accept error: {err}");
            }
        }
    }
}

/// Binds the configured listening address and serves forever. Returns only
/// on an unrecoverable bind/listen error (§4.7: "the process terminates only
/// on an unrecoverable bind/listen error").
pub async fn run(config: Config) -> Result<(), ServerError> {
    let listener = bind(&config)?;
    log::info!(
        "{} listening on {}:{}",
        config.server_name,
        config.bind_address,
        config.port
    );
    let registry = Registry::new(config);
    serve(listener, registry).await;
    Ok(())
}
