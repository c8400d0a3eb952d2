mod actor;
mod config;
mod connection;
mod engine;
mod error;
mod media;
mod signaling;

pub use actor::{SessionActor, SessionCommand, SessionHandle, SessionSnapshot, spawn_session};
pub use config::ClientConfig;
pub use connection::{
    CandidateIngest, ConnectionEvent, ConnectionEvents, ConnectionManager, LinkState,
    MAX_PENDING_CANDIDATES, PeerConnection, PeerConnector, RtcConnector, RtcPeer,
};
pub use engine::{NegotiationEngine, NegotiationState, Session};
pub use error::CallError;
pub use media::{
    LocalTrack, LoggingRenderer, MediaBinder, MediaKind, MediaRenderer, MediaSource, RemoteStream,
    RemoteTrack, SyntheticCapture,
};
pub use signaling::{SignalingChannel, SignalingTransport, WsTransport};
