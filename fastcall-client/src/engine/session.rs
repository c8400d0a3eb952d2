use crate::connection::{ConnectionEvent, ConnectionManager, PeerConnector};
use crate::engine::NegotiationState;
use crate::media::{MediaRenderer, RemoteStream};
use crate::signaling::SignalingChannel;
use fastcall_core::{ClientId, NetworkCandidate, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Per-participant call state: one room, one relay connection, at most one
/// peer connection.
pub struct Session {
    pub(crate) room_id: Option<RoomId>,
    pub(crate) client_id: Option<ClientId>,
    pub(crate) state: NegotiationState,
    pub(crate) channel: Option<SignalingChannel>,
    pub(crate) connection: ConnectionManager,
    pub(crate) events: mpsc::Receiver<ConnectionEvent>,
}

impl Session {
    pub(crate) fn new(connector: Arc<dyn PeerConnector>, renderer: Arc<dyn MediaRenderer>) -> Self {
        let (events_tx, events) = mpsc::channel(256);
        Self {
            room_id: None,
            client_id: None,
            state: NegotiationState::Idle,
            channel: None,
            connection: ConnectionManager::new(connector, renderer, events_tx),
            events,
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn pending_candidates(&self) -> &[NetworkCandidate] {
        self.connection.pending_candidates()
    }

    pub fn local_track_count(&self) -> usize {
        self.connection.local_track_count()
    }

    pub fn remote_stream(&self) -> Option<&RemoteStream> {
        self.connection.media().remote_stream()
    }

    pub(crate) fn label(&self) -> String {
        match (&self.client_id, &self.room_id) {
            (Some(client), Some(room)) => format!("{}@{}", client, room),
            _ => "unjoined".to_owned(),
        }
    }
}
