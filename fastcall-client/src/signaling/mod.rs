mod signaling_channel;
mod ws_transport;

pub use signaling_channel::SignalingChannel;
pub use ws_transport::WsTransport;

use crate::error::CallError;
use async_trait::async_trait;
use fastcall_core::{ClientId, RoomId};

/// Opens the relay connection for one participant of one room.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn open(&self, room: &RoomId, client: &ClientId) -> Result<SignalingChannel, CallError>;
}
