use crate::room::{PeerSender, Room};
use axum::extract::ws::Message;
use dashmap::DashMap;
use fastcall_core::{ClientId, RoomId};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, room_id: &RoomId, client: ClientId, tx: PeerSender) {
        let mut room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::default()
        });

        if room.insert(client.clone(), tx).is_some() {
            warn!(
                "Client {} re-registered in room {}; replacing older connection",
                client, room_id
            );
        }
    }

    /// Drops the member and, once nobody is left, the room itself.
    pub fn leave(&self, room_id: &RoomId, client: &ClientId, tx: &PeerSender) {
        if let Some(mut room) = self.rooms.get_mut(room_id) {
            room.remove(client, tx);
        }

        if self.rooms.remove_if(room_id, |_, room| room.is_empty()).is_some() {
            info!("Room {} is empty, removing", room_id);
        }
    }

    /// Sends `frame` to every member of the room except `sender`.
    /// Returns the number of members it was queued for.
    pub fn broadcast(&self, room_id: &RoomId, frame: Message, sender: &ClientId) -> usize {
        // Collect first so the map guard is not held while sending.
        let recipients = match self.rooms.get(room_id) {
            Some(room) => room.recipients(sender),
            None => return 0,
        };

        let mut delivered = 0;
        for tx in recipients {
            if tx.send(frame.clone()).is_ok() {
                delivered += 1;
            } else {
                debug!("Dropping frame for a closed member of room {}", room_id);
            }
        }
        delivered
    }

    pub fn room_size(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map(|room| room.len()).unwrap_or(0)
    }

    pub fn contains(&self, room_id: &RoomId, client: &ClientId) -> bool {
        self.rooms
            .get(room_id)
            .map(|room| room.contains(client))
            .unwrap_or(false)
    }

    pub fn rooms(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }
}
