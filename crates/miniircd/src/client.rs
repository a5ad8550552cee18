use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, mpsc};

pub type ClientId = u64;

/// Mutable identity fields for one connected client.
///
/// `registered` and `disconnecting` are plain booleans guarded by the same
/// `RwLock` as the rest of the identity fields: both only ever flip
/// false→true, and every write goes through [`ClientHandle`] methods that
/// check-then-set under one write lock, so there is no lost-update race
/// between e.g. two NICK/USER commands racing to complete registration
/// (they can't race — both arrive on the same connection task, sequentially).
#[derive(Debug, Default)]
struct Identity {
    nickname: String,
    username: String,
    realname: String,
    hostname: String,
    registered: bool,
}

/// A connected client as seen by the rest of the server: identity state
/// plus a send handle into its connection's writer task. Cheaply cloned
/// (it's an `Arc` inside) and safely shared across every connection task
/// that needs to address this client — e.g. to deliver a PRIVMSG.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub id: ClientId,
    identity: Arc<RwLock<Identity>>,
    disconnecting: Arc<AtomicBool>,
    outbound: mpsc::Sender<String>,
}

/// Outbound queue depth for one client. A persistently slow reader will
/// have sends fail rather than stall the broadcaster — see §5 Blocking
/// discipline.
pub const OUTBOUND_QUEUE_SIZE: usize = 256;

impl ClientHandle {
    pub fn new(id: ClientId, hostname: String) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_SIZE);
        let identity = Identity {
            hostname,
            ..Identity::default()
        };
        (
            ClientHandle {
                id,
                identity: Arc::new(RwLock::new(identity)),
                disconnecting: Arc::new(AtomicBool::new(false)),
                outbound: tx,
            },
            rx,
        )
    }

    /// Best-effort send of one already-CRLF-terminated line. A full queue
    /// or a closed receiver is logged and dropped, never retried or
    /// propagated as an error to the sender.
    pub fn send_line(&self, line: String) {
        if let Err(err) = self.outbound.try_send(line) {
            log::warn!("client {}: dropping outbound line: {err}", self.id);
        }
    }

    pub async fn nickname(&self) -> String {
        self.identity.read().await.nickname.clone()
    }

    /// The client's nick, or `*` if it hasn't picked one yet — the
    /// placeholder used throughout the numeric-reply protocol (§4.4).
    pub async fn nickname_or_placeholder(&self) -> String {
        let nick = self.nickname().await;
        if nick.is_empty() { "*".to_string() } else { nick }
    }

    pub async fn username(&self) -> String {
        self.identity.read().await.username.clone()
    }

    pub async fn hostname(&self) -> String {
        self.identity.read().await.hostname.clone()
    }

    pub fn is_disconnecting(&self) -> bool {
        self.disconnecting.load(Ordering::Acquire)
    }

    pub fn mark_disconnecting(&self) {
        self.disconnecting.store(true, Ordering::Release);
    }

    pub async fn is_registered(&self) -> bool {
        self.identity.read().await.registered
    }

    /// Set the nickname unconditionally (uniqueness is the registry's job,
    /// checked before this is called). Returns the previous nickname, which
    /// is non-empty only when this is a nick change on an already-registered
    /// client (the case that triggers a NICK broadcast).
    pub async fn set_nickname(&self, nick: String) -> String {
        let mut identity = self.identity.write().await;
        std::mem::replace(&mut identity.nickname, nick)
    }

    pub async fn set_user_fields(&self, username: String, hostname: String, realname: String) {
        let mut identity = self.identity.write().await;
        identity.username = username;
        identity.hostname = hostname;
        identity.realname = realname;
    }

    /// Flip `registered` true and return whether this call performed the
    /// false→true transition (callers use this to decide whether to emit
    /// the one-time welcome burst). Monotonic: once true, stays true.
    pub async fn try_complete_registration(&self) -> bool {
        let mut identity = self.identity.write().await;
        if identity.registered {
            return false;
        }
        if identity.nickname.is_empty() || identity.username.is_empty() {
            return false;
        }
        identity.registered = true;
        true
    }
}
