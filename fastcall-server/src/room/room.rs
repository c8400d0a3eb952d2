use axum::extract::ws::Message;
use fastcall_core::ClientId;
use std::collections::HashMap;
use tokio::sync::mpsc;

pub type PeerSender = mpsc::UnboundedSender<Message>;

/// Members of one relay room, keyed by client id.
#[derive(Default)]
pub struct Room {
    members: HashMap<ClientId, PeerSender>,
}

impl Room {
    /// Returns the sender this one displaced, if the id was already present.
    pub fn insert(&mut self, client: ClientId, tx: PeerSender) -> Option<PeerSender> {
        self.members.insert(client, tx)
    }

    /// Removes `client` only while it is still bound to `tx`.
    pub fn remove(&mut self, client: &ClientId, tx: &PeerSender) -> bool {
        match self.members.get(client) {
            Some(current) if current.same_channel(tx) => {
                self.members.remove(client);
                true
            }
            _ => false,
        }
    }

    pub fn recipients(&self, except: &ClientId) -> Vec<PeerSender> {
        self.members
            .iter()
            .filter(|(id, _)| *id != except)
            .map(|(_, tx)| tx.clone())
            .collect()
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.members.contains_key(client)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
