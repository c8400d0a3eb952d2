use crate::room::{PeerSender, RoomRegistry};
use axum::extract::ws::{Message, Utf8Bytes};
use fastcall_core::{ClientId, Envelope, RoomId};
use tracing::{debug, info, warn};

/// Forwards signaling frames between the members of a room.
///
/// Frames are relayed verbatim; only the `type` discriminator is read so
/// the relay stays agnostic to SDP and candidate payloads.
#[derive(Clone, Default)]
pub struct RelayService {
    registry: RoomRegistry,
}

impl RelayService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn connect(&self, room: &RoomId, client: &ClientId, tx: PeerSender) {
        self.registry.join(room, client.clone(), tx);
        info!("Client {} connected to room {}", client, room);
    }

    pub fn disconnect(&self, room: &RoomId, client: &ClientId, tx: &PeerSender) {
        self.registry.leave(room, client, tx);
        info!("Client {} disconnected from room {}", client, room);
    }

    /// Returns how many room members the frame was forwarded to.
    pub fn relay(&self, room: &RoomId, client: &ClientId, text: Utf8Bytes) -> usize {
        let envelope = match Envelope::parse(text.as_str()) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Invalid signaling frame from {} in room {}: {}", client, room, e);
                return 0;
            }
        };

        let Some(kind) = envelope.relay_kind() else {
            warn!("Unknown message type received: {}", envelope.kind);
            return 0;
        };

        info!("{} sent {} in room {}", client, kind.as_str(), room);
        let delivered = self.registry.broadcast(room, Message::Text(text), client);
        debug!("Relayed {} to {} member(s) of {}", kind.as_str(), delivered, room);
        delivered
    }
}
