use crate::connection::{ConnectionEvent, LinkState};
use crate::engine::{NegotiationEngine, NegotiationState, Session};
use tracing::{debug, info, warn};

impl NegotiationEngine {
    pub async fn handle_connection_event(&self, session: &mut Session, event: ConnectionEvent) {
        if !session.connection.is_current(event.generation()) {
            debug!(
                "[{}] Discarding event from retired connection {}",
                session.label(),
                event.generation()
            );
            return;
        }

        match event {
            ConnectionEvent::CandidateDiscovered(_, candidate) => {
                debug!("[{}] Sending local candidate", session.label());
                Self::send_signal(session, candidate.into());
            }
            ConnectionEvent::TrackArrived(_, track) => {
                session.connection.media_mut().on_remote_track(track);
            }
            ConnectionEvent::StateChanged(_, LinkState::Connected) => {
                info!("[{}] Media path established", session.label());
                if session.state == NegotiationState::Answering {
                    Self::transition(session, NegotiationState::Connected);
                }
            }
            ConnectionEvent::StateChanged(
                _,
                state @ (LinkState::Failed | LinkState::Disconnected),
            ) => {
                warn!("[{}] Peer connection {}", session.label(), state);
            }
            ConnectionEvent::StateChanged(_, state) => {
                debug!("[{}] Peer connection {}", session.label(), state);
            }
        }
    }
}
