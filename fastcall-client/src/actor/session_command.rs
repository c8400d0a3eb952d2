use crate::engine::NegotiationState;
use crate::error::Result;
use fastcall_core::{ClientId, RoomId};
use tokio::sync::oneshot;

/// UI triggers delivered to a running session.
#[derive(Debug)]
pub enum SessionCommand {
    Join {
        room: String,
        respond_to: oneshot::Sender<Result<()>>,
    },
    Start {
        respond_to: oneshot::Sender<Result<()>>,
    },
    Hangup {
        respond_to: oneshot::Sender<Result<()>>,
    },
    Leave {
        respond_to: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        respond_to: oneshot::Sender<SessionSnapshot>,
    },
}

/// Point-in-time view of a session, for display and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: NegotiationState,
    pub room_id: Option<RoomId>,
    pub client_id: Option<ClientId>,
    pub local_tracks: usize,
    pub remote_tracks: usize,
    pub pending_candidates: usize,
}
