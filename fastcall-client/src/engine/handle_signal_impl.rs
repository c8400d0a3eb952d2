use crate::connection::CandidateIngest;
use crate::engine::{NegotiationEngine, NegotiationState, Session};
use crate::error::Result;
use fastcall_core::{NetworkCandidate, SessionDescription, SignalMessage, WireError};
use tracing::{debug, info, warn};

impl NegotiationEngine {
    /// Dispatches one raw frame from the relay. Frames that cannot be read
    /// are logged and dropped.
    pub async fn handle_inbound(&self, session: &mut Session, text: &str) -> Result<()> {
        let msg = match SignalMessage::decode(text) {
            Ok(msg) => msg,
            Err(WireError::UnknownKind(kind)) => {
                warn!("[{}] Unknown message type: {}", session.label(), kind);
                return Ok(());
            }
            Err(e) => {
                warn!("[{}] Dropping unreadable frame: {}", session.label(), e);
                return Ok(());
            }
        };
        self.handle_message(session, msg).await
    }

    pub async fn handle_message(&self, session: &mut Session, msg: SignalMessage) -> Result<()> {
        if session.state == NegotiationState::Idle {
            warn!("Ignoring {} received while idle", msg.kind());
            return Ok(());
        }
        debug!("[{}] Received {}", session.label(), msg.kind());

        match msg {
            SignalMessage::Offer { sdp } => {
                self.handle_remote_offer(session, SessionDescription::offer(sdp))
                    .await
            }
            SignalMessage::Answer { sdp } => {
                self.handle_remote_answer(session, SessionDescription::answer(sdp))
                    .await
            }
            SignalMessage::Candidate {
                candidate,
                sdp_mid,
                sdp_m_line_index,
            } => {
                let candidate = NetworkCandidate {
                    candidate,
                    sdp_mid,
                    sdp_m_line_index,
                };
                self.handle_remote_candidate(session, candidate).await
            }
            SignalMessage::Hangup => {
                self.handle_remote_hangup(session).await;
                Ok(())
            }
        }
    }

    async fn handle_remote_answer(
        &self,
        session: &mut Session,
        answer: SessionDescription,
    ) -> Result<()> {
        match session.connection.apply_remote_answer(&answer).await {
            Ok(()) => {
                info!("[{}] Remote answer applied", session.label());
                Self::transition(session, NegotiationState::Connected);
                Ok(())
            }
            Err(e) => {
                if session.state == NegotiationState::Offering {
                    warn!("[{}] Abandoning offer: {}", session.label(), e);
                    Self::send_signal(session, SignalMessage::Hangup);
                    session.connection.close().await;
                    Self::transition(session, NegotiationState::Joined);
                }
                Err(e)
            }
        }
    }

    async fn handle_remote_candidate(
        &self,
        session: &mut Session,
        candidate: NetworkCandidate,
    ) -> Result<()> {
        match session.connection.add_remote_candidate(candidate).await? {
            CandidateIngest::Applied => debug!("[{}] Remote candidate applied", session.label()),
            CandidateIngest::Buffered => debug!(
                "[{}] Remote candidate buffered ({} pending)",
                session.label(),
                session.pending_candidates().len()
            ),
        }
        Ok(())
    }
}
