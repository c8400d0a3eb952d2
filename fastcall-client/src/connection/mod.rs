mod connection_event;
mod connection_manager;
mod rtc_connector;

pub use connection_event::{ConnectionEvent, ConnectionEvents, LinkState};
pub use connection_manager::{CandidateIngest, ConnectionManager, MAX_PENDING_CANDIDATES};
pub use rtc_connector::{RtcConnector, RtcPeer};

use async_trait::async_trait;
use fastcall_core::{NetworkCandidate, SessionDescription};
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;

/// One peer-to-peer media connection.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_track(&self, track: Arc<dyn TrackLocal + Send + Sync>) -> anyhow::Result<()>;

    /// Generates an offer and installs it as the local description.
    async fn create_offer(&self) -> anyhow::Result<String>;

    /// Generates an answer and installs it as the local description.
    async fn create_answer(&self) -> anyhow::Result<String>;

    async fn set_remote_description(&self, desc: &SessionDescription) -> anyhow::Result<()>;

    async fn add_ice_candidate(&self, candidate: &NetworkCandidate) -> anyhow::Result<()>;

    async fn close(&self) -> anyhow::Result<()>;
}

/// Builds connections whose callbacks report through `events`.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(&self, events: ConnectionEvents) -> anyhow::Result<Box<dyn PeerConnection>>;
}
