use crate::engine::{NegotiationEngine, NegotiationState, Session};
use crate::error::Result;
use fastcall_core::SessionDescription;
use tracing::{error, info};

impl NegotiationEngine {
    /// Answers a remote offer. Whatever connection existed is replaced, so
    /// when both sides offered at once the later offer wins.
    pub(super) async fn handle_remote_offer(
        &self,
        session: &mut Session,
        offer: SessionDescription,
    ) -> Result<()> {
        if session.connection.is_active() {
            info!(
                "[{}] Offer received while {}, replacing connection",
                session.label(),
                session.state
            );
        }

        match Self::answer_offer(session, &offer).await {
            Ok(answer) => {
                info!("[{}] Sending answer", session.label());
                Self::send_signal(session, answer.into());
                Self::transition(session, NegotiationState::Answering);
                Ok(())
            }
            Err(e) => {
                error!("[{}] Could not answer offer: {}", session.label(), e);
                session.connection.close().await;
                Self::transition(session, NegotiationState::Joined);
                Err(e)
            }
        }
    }

    async fn answer_offer(
        session: &mut Session,
        offer: &SessionDescription,
    ) -> Result<SessionDescription> {
        session.connection.replace().await?;
        session.connection.create_answer(offer).await
    }
}
