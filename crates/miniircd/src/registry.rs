use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::channel::Channel;
use crate::client::{ClientHandle, ClientId};
use crate::config::Config;

/// Process-wide client and channel state. Every connection task holds a
/// clone of this (it's all `Arc`/`DashMap` internally) and mutates it
/// directly — there is no single event loop serializing access; the
/// concurrent maps do that job instead (see SPEC_FULL.md §5).
#[derive(Clone)]
pub struct Registry {
    pub config: Config,
    clients: DashMap<ClientId, ClientHandle>,
    channels: DashMap<String, Channel>,
    next_id: std::sync::Arc<AtomicU64>,
}

impl Registry {
    pub fn new(config: Config) -> Self {
        Registry {
            config,
            clients: DashMap::new(),
            channels: DashMap::new(),
            next_id: std::sync::Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn next_client_id(&self) -> ClientId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn register_client(&self, client: ClientHandle) {
        self.clients.insert(client.id, client);
    }

    pub fn remove_client(&self, id: ClientId) {
        self.clients.remove(&id);
    }

    pub fn get_client(&self, id: ClientId) -> Option<ClientHandle> {
        self.clients.get(&id).map(|entry| entry.clone())
    }

    /// All client ids, in connection order (ids are assigned monotonically,
    /// so sorting by id recovers insertion order even though `DashMap`
    /// itself has no ordering guarantee).
    pub fn client_ids_in_order(&self) -> Vec<ClientId> {
        let mut ids: Vec<ClientId> = self.clients.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Find a client by its current nickname (exact, case-sensitive match).
    pub async fn find_by_nickname(&self, nick: &str) -> Option<ClientHandle> {
        for id in self.client_ids_in_order() {
            if let Some(client) = self.get_client(id) {
                if client.nickname().await == nick {
                    return Some(client);
                }
            }
        }
        None
    }

    pub async fn nickname_in_use(&self, nick: &str, excluding: ClientId) -> bool {
        for id in self.client_ids_in_order() {
            if id == excluding {
                continue;
            }
            if let Some(client) = self.get_client(id) {
                if client.nickname().await == nick {
                    return true;
                }
            }
        }
        false
    }

    /// Deliver `line` to every client except `excluding` (pass `None` to
    /// exclude no one — the "all clients" broadcast).
    pub async fn broadcast_to_all(&self, line: &str, excluding: Option<ClientId>) {
        for id in self.client_ids_in_order() {
            if Some(id) == excluding {
                continue;
            }
            if let Some(client) = self.get_client(id) {
                client.send_line(line.to_string());
            }
        }
    }

    pub fn channel_exists(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn get_or_create_channel(&self, name: &str) {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name.to_string()));
    }

    pub fn with_channel<R>(&self, name: &str, f: impl FnOnce(&Channel) -> R) -> Option<R> {
        self.channels.get(name).map(|entry| f(&entry))
    }

    /// Deliver `line` to every member of `channel` except `excluding`.
    pub fn broadcast_to_channel(&self, channel_name: &str, line: &str, excluding: Option<ClientId>) {
        let Some(channel) = self.channels.get(channel_name) else {
            return;
        };
        for id in channel.member_ids_sorted() {
            if Some(id) == excluding {
                continue;
            }
            if let Some(client) = self.get_client(id) {
                client.send_line(line.to_string());
            }
        }
    }

    /// Remove the channel from the registry if it has no members left.
    pub fn drop_channel_if_empty(&self, name: &str) {
        let should_remove = self
            .channels
            .get(name)
            .map(|channel| channel.is_empty())
            .unwrap_or(false);
        if should_remove {
            self.channels.remove(name);
        }
    }

    /// All channel names a client currently belongs to.
    pub fn channels_for(&self, id: ClientId) -> Vec<String> {
        self.channels
            .iter()
            .filter(|entry| entry.value().is_member(id))
            .map(|entry| entry.key().clone())
            .collect()
    }
}
