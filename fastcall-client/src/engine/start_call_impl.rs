use crate::engine::{NegotiationEngine, NegotiationState, Session};
use crate::error::{CallError, Result};
use tracing::{error, info};

impl NegotiationEngine {
    /// Acquires local media, opens a connection and sends an offer.
    pub async fn start(&self, session: &mut Session) -> Result<()> {
        if session.state != NegotiationState::Joined {
            return Err(CallError::InvalidState {
                op: "start",
                state: session.state,
            });
        }

        let tracks = self
            .capture
            .acquire()
            .await
            .map_err(|e| CallError::MediaAcquisition(format!("{e:#}")))?;
        info!("[{}] Acquired {} local track(s)", session.label(), tracks.len());

        if let Err(e) = self.send_offer(session, tracks).await {
            error!("[{}] Could not start call: {}", session.label(), e);
            session.connection.close().await;
            return Err(e);
        }
        Ok(())
    }

    async fn send_offer(
        &self,
        session: &mut Session,
        tracks: Vec<crate::media::LocalTrack>,
    ) -> Result<()> {
        session.connection.attach_local_tracks(tracks).await?;
        session.connection.create().await?;
        let offer = session.connection.create_offer().await?;

        info!("[{}] Sending offer", session.label());
        Self::send_signal(session, offer.into());
        Self::transition(session, NegotiationState::Offering);
        Ok(())
    }
}
