mod client;
mod description;
mod envelope;
mod room;
mod signaling;

pub use client::ClientId;
pub use description::{NetworkCandidate, SdpKind, SessionDescription};
pub use envelope::{Envelope, RelayKind};
pub use room::RoomId;
pub use signaling::{IceServerConfig, SignalMessage};
