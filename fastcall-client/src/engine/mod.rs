mod connection_event_impl;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod hangup_impl;
mod join_impl;
mod session;
mod start_call_impl;

pub use session::Session;

use crate::config::ClientConfig;
use crate::connection::{PeerConnector, RtcConnector};
use crate::media::{MediaRenderer, MediaSource};
use crate::signaling::{SignalingTransport, WsTransport};
use fastcall_core::SignalMessage;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    Joined,
    Offering,
    Answering,
    Connected,
    Closed,
}

impl NegotiationState {
    /// `true` while a connection attempt or call is in progress.
    pub fn in_call(&self) -> bool {
        matches!(
            self,
            NegotiationState::Offering | NegotiationState::Answering | NegotiationState::Connected
        )
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NegotiationState::Idle => "idle",
            NegotiationState::Joined => "joined",
            NegotiationState::Offering => "offering",
            NegotiationState::Answering => "answering",
            NegotiationState::Connected => "connected",
            NegotiationState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Drives sessions through offer/answer. The engine holds only the
/// collaborators; all per-call state lives in [`Session`], so one engine can
/// serve any number of sessions.
pub struct NegotiationEngine {
    transport: Arc<dyn SignalingTransport>,
    connector: Arc<dyn PeerConnector>,
    capture: Arc<dyn MediaSource>,
    renderer: Arc<dyn MediaRenderer>,
}

impl NegotiationEngine {
    pub fn new(
        transport: Arc<dyn SignalingTransport>,
        connector: Arc<dyn PeerConnector>,
        capture: Arc<dyn MediaSource>,
        renderer: Arc<dyn MediaRenderer>,
    ) -> Self {
        Self {
            transport,
            connector,
            capture,
            renderer,
        }
    }

    /// WebSocket relay plus real WebRTC connections.
    pub fn from_config(
        config: &ClientConfig,
        capture: Arc<dyn MediaSource>,
        renderer: Arc<dyn MediaRenderer>,
    ) -> Self {
        Self::new(
            Arc::new(WsTransport::new(config.signaling_url.clone())),
            Arc::new(RtcConnector::new(config.ice_servers.clone())),
            capture,
            renderer,
        )
    }

    pub fn new_session(&self) -> Session {
        Session::new(self.connector.clone(), self.renderer.clone())
    }

    /// Handles every inbound frame and connection event that is already
    /// queued, without waiting for more. Returns how many were handled.
    pub async fn drain_pending(&self, session: &mut Session) -> usize {
        let mut handled = 0;
        loop {
            if let Some(text) = session.channel.as_mut().and_then(|c| c.try_recv()) {
                if let Err(e) = self.handle_inbound(session, &text).await {
                    warn!("{}", e);
                }
                handled += 1;
                continue;
            }
            if let Ok(event) = session.events.try_recv() {
                self.handle_connection_event(session, event).await;
                handled += 1;
                continue;
            }
            return handled;
        }
    }

    fn transition(session: &mut Session, next: NegotiationState) {
        if session.state == next {
            return;
        }
        info!("[{}] {} -> {}", session.label(), session.state, next);
        session.state = next;
    }

    fn send_signal(session: &Session, msg: SignalMessage) {
        match &session.channel {
            Some(channel) => {
                channel.send(&msg);
            }
            None => warn!("[{}] No relay connection, dropping {}", session.label(), msg.kind()),
        }
    }
}
