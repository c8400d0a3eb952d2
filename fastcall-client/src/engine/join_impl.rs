use crate::engine::{NegotiationEngine, NegotiationState, Session};
use crate::error::{CallError, Result};
use fastcall_core::{ClientId, RoomId};
use tracing::{info, warn};

impl NegotiationEngine {
    /// Opens the relay connection for `room` under a fresh client id.
    pub async fn join(&self, session: &mut Session, room: &str) -> Result<()> {
        if session.state != NegotiationState::Idle {
            return Err(CallError::InvalidState {
                op: "join",
                state: session.state,
            });
        }
        let room = RoomId::parse(room).ok_or(CallError::InvalidRoom)?;
        let client = ClientId::new();

        let channel = self.transport.open(&room, &client).await?;

        session.room_id = Some(room);
        session.client_id = Some(client);
        session.channel = Some(channel);
        Self::transition(session, NegotiationState::Joined);
        Ok(())
    }

    /// Ends any call, then drops the relay connection. Repeating is a no-op.
    pub async fn leave(&self, session: &mut Session) -> Result<()> {
        if session.state == NegotiationState::Idle {
            return Ok(());
        }
        if session.state.in_call() {
            self.end_call(session, true).await;
        } else {
            session.connection.close().await;
        }

        if let Some(mut channel) = session.channel.take() {
            channel.close();
        }
        info!("[{}] Left room", session.label());
        session.room_id = None;
        session.client_id = None;
        Self::transition(session, NegotiationState::Idle);
        Ok(())
    }

    /// The relay went away underneath the session.
    pub async fn handle_channel_dropped(&self, session: &mut Session) {
        warn!("[{}] Relay connection lost", session.label());
        session.connection.close().await;
        session.channel = None;
        session.room_id = None;
        session.client_id = None;
        Self::transition(session, NegotiationState::Idle);
    }
}
