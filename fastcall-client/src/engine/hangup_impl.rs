use crate::engine::{NegotiationEngine, NegotiationState, Session};
use crate::error::{CallError, Result};
use fastcall_core::SignalMessage;
use tracing::{debug, info};

impl NegotiationEngine {
    /// Ends the current call and tells the peer. Without a call this is a
    /// no-op, so at most one hangup reaches the relay per call.
    pub async fn hangup(&self, session: &mut Session) -> Result<()> {
        match session.state {
            NegotiationState::Idle => Err(CallError::InvalidState {
                op: "hangup",
                state: session.state,
            }),
            state if state.in_call() => {
                self.end_call(session, true).await;
                Ok(())
            }
            _ => {
                debug!("[{}] No call to hang up", session.label());
                Ok(())
            }
        }
    }

    pub(super) async fn handle_remote_hangup(&self, session: &mut Session) {
        if !session.state.in_call() {
            debug!("[{}] Remote hangup with no call in progress", session.label());
            session.connection.close().await;
            return;
        }
        info!("[{}] Remote peer hung up", session.label());
        self.end_call(session, false).await;
    }

    pub(super) async fn end_call(&self, session: &mut Session, notify_peer: bool) {
        if notify_peer {
            Self::send_signal(session, SignalMessage::Hangup);
        }
        Self::transition(session, NegotiationState::Closed);
        let stopped = session.connection.close().await;
        debug!("[{}] Released {} local track(s)", session.label(), stopped);
        Self::transition(session, NegotiationState::Joined);
    }
}
