use crate::media::RemoteTrack;
use fastcall_core::NetworkCandidate;
use std::fmt;
use tokio::sync::mpsc;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl From<RTCPeerConnectionState> for LinkState {
    fn from(state: RTCPeerConnectionState) -> Self {
        match state {
            RTCPeerConnectionState::Connecting => LinkState::Connecting,
            RTCPeerConnectionState::Connected => LinkState::Connected,
            RTCPeerConnectionState::Disconnected => LinkState::Disconnected,
            RTCPeerConnectionState::Failed => LinkState::Failed,
            RTCPeerConnectionState::Closed => LinkState::Closed,
            _ => LinkState::New,
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Callback output of a connection. The leading `u64` is the generation of
/// the connection that produced it, so events from a replaced connection
/// can be told apart from the current one.
#[derive(Debug)]
pub enum ConnectionEvent {
    CandidateDiscovered(u64, NetworkCandidate),
    TrackArrived(u64, RemoteTrack),
    StateChanged(u64, LinkState),
}

impl ConnectionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::CandidateDiscovered(g, _)
            | Self::TrackArrived(g, _)
            | Self::StateChanged(g, _) => *g,
        }
    }
}

/// Sending half handed to a connector, stamped with one generation.
#[derive(Debug, Clone)]
pub struct ConnectionEvents {
    generation: u64,
    tx: mpsc::Sender<ConnectionEvent>,
}

impl ConnectionEvents {
    pub(crate) fn new(generation: u64, tx: mpsc::Sender<ConnectionEvent>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn candidate(&self, candidate: NetworkCandidate) {
        let _ = self
            .tx
            .send(ConnectionEvent::CandidateDiscovered(self.generation, candidate))
            .await;
    }

    pub async fn track(&self, track: RemoteTrack) {
        let _ = self
            .tx
            .send(ConnectionEvent::TrackArrived(self.generation, track))
            .await;
    }

    pub async fn state(&self, state: LinkState) {
        let _ = self
            .tx
            .send(ConnectionEvent::StateChanged(self.generation, state))
            .await;
    }
}
