use dashmap::DashSet;

use crate::client::ClientId;

/// A named channel and its membership. Members are non-owning references
/// (plain [`ClientId`]s) into the registry's client map — the channel
/// itself owns nothing but the set of ids and the name.
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub members: DashSet<ClientId>,
}

impl Channel {
    pub fn new(name: String) -> Self {
        Channel {
            name,
            members: DashSet::new(),
        }
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn add_member(&self, id: ClientId) -> bool {
        self.members.insert(id)
    }

    pub fn remove_member(&self, id: ClientId) {
        self.members.remove(&id);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in an order stable enough for NAMES-style listings:
    /// lowest `ClientId` first (== join order, ids are monotonic).
    pub fn member_ids_sorted(&self) -> Vec<ClientId> {
        let mut ids: Vec<ClientId> = self.members.iter().map(|id| *id).collect();
        ids.sort_unstable();
        ids
    }
}
