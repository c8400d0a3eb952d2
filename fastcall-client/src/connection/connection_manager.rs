use crate::connection::{ConnectionEvent, ConnectionEvents, PeerConnection, PeerConnector};
use crate::error::{CallError, Result};
use crate::media::{LocalTrack, MediaBinder, MediaRenderer};
use fastcall_core::{NetworkCandidate, SdpKind, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Remote candidates held while no remote description is applied.
pub const MAX_PENDING_CANDIDATES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateIngest {
    Applied,
    Buffered,
}

struct ActiveConnection {
    generation: u64,
    peer: Box<dyn PeerConnection>,
    offer_sent: bool,
    remote_applied: bool,
    pending: Vec<NetworkCandidate>,
}

impl ActiveConnection {
    async fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        debug!("Flushing {} buffered candidate(s)", pending.len());
        for candidate in pending {
            if let Err(e) = self.peer.add_ice_candidate(&candidate).await {
                warn!("Buffered candidate {} rejected: {:#}", candidate.candidate, e);
            }
        }
    }
}

/// Owns at most one peer connection at a time, plus the local media bound
/// to it.
pub struct ConnectionManager {
    connector: Arc<dyn PeerConnector>,
    events_tx: mpsc::Sender<ConnectionEvent>,
    active: Option<ActiveConnection>,
    next_generation: u64,
    media: MediaBinder,
}

impl ConnectionManager {
    pub fn new(
        connector: Arc<dyn PeerConnector>,
        renderer: Arc<dyn MediaRenderer>,
        events_tx: mpsc::Sender<ConnectionEvent>,
    ) -> Self {
        Self {
            connector,
            events_tx,
            active: None,
            next_generation: 0,
            media: MediaBinder::new(renderer),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// `true` when `generation` belongs to the live connection.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == Some(generation)
    }

    pub fn pending_candidates(&self) -> &[NetworkCandidate] {
        self.active
            .as_ref()
            .map(|a| a.pending.as_slice())
            .unwrap_or_default()
    }

    pub fn local_track_count(&self) -> usize {
        self.media.local_tracks().len()
    }

    pub fn media(&self) -> &MediaBinder {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaBinder {
        &mut self.media
    }

    /// Opens a connection and binds any attached local media to it.
    pub async fn create(&mut self) -> Result<u64> {
        if let Some(active) = &self.active {
            return Err(CallError::Negotiation(format!(
                "connection {} is already open",
                active.generation
            )));
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let events = ConnectionEvents::new(generation, self.events_tx.clone());
        let peer = self
            .connector
            .connect(events)
            .await
            .map_err(|e| CallError::Negotiation(format!("failed to create connection: {e:#}")))?;

        if let Err(e) = self.media.bind_local(peer.as_ref()).await {
            let _ = peer.close().await;
            return Err(CallError::Negotiation(format!("{e:#}")));
        }

        self.active = Some(ActiveConnection {
            generation,
            peer,
            offer_sent: false,
            remote_applied: false,
            pending: Vec::new(),
        });
        info!("Peer connection {} created", generation);
        Ok(generation)
    }

    /// Swaps the live connection for a fresh one. Local media survives and
    /// is re-bound; events from the old connection become stale.
    pub async fn replace(&mut self) -> Result<u64> {
        self.teardown().await;
        self.create().await
    }

    /// Stores captured tracks and binds them to the live connection, if any.
    pub async fn attach_local_tracks(&mut self, tracks: Vec<LocalTrack>) -> Result<()> {
        self.media.set_local(tracks);
        if let Some(active) = &self.active {
            self.media
                .bind_local(active.peer.as_ref())
                .await
                .map_err(|e| CallError::Negotiation(format!("{e:#}")))?;
        }
        Ok(())
    }

    pub async fn create_offer(&mut self) -> Result<SessionDescription> {
        if !self.media.has_local_media() {
            return Err(CallError::Negotiation(
                "local media has not been attached".to_owned(),
            ));
        }
        let active = self.active_mut()?;

        let sdp = active
            .peer
            .create_offer()
            .await
            .map_err(|e| CallError::Negotiation(format!("failed to create offer: {e:#}")))?;
        active.offer_sent = true;

        Ok(SessionDescription::offer(sdp))
    }

    /// Applies `remote_offer`, flushes buffered candidates and produces the
    /// local answer.
    pub async fn create_answer(
        &mut self,
        remote_offer: &SessionDescription,
    ) -> Result<SessionDescription> {
        if remote_offer.kind() != SdpKind::Offer || remote_offer.sdp().trim().is_empty() {
            return Err(CallError::Negotiation("malformed remote offer".to_owned()));
        }
        let active = self.active_mut()?;

        active
            .peer
            .set_remote_description(remote_offer)
            .await
            .map_err(|e| CallError::Negotiation(format!("remote offer rejected: {e:#}")))?;
        active.remote_applied = true;
        active.flush_pending().await;

        let sdp = active
            .peer
            .create_answer()
            .await
            .map_err(|e| CallError::Negotiation(format!("failed to create answer: {e:#}")))?;

        Ok(SessionDescription::answer(sdp))
    }

    pub async fn apply_remote_answer(&mut self, remote_answer: &SessionDescription) -> Result<()> {
        if remote_answer.kind() != SdpKind::Answer || remote_answer.sdp().trim().is_empty() {
            return Err(CallError::Negotiation("malformed remote answer".to_owned()));
        }
        let active = self.active_mut()?;

        if !active.offer_sent {
            return Err(CallError::Negotiation(
                "no local offer is awaiting an answer".to_owned(),
            ));
        }
        if active.remote_applied {
            return Err(CallError::Negotiation(
                "remote answer already applied".to_owned(),
            ));
        }

        active
            .peer
            .set_remote_description(remote_answer)
            .await
            .map_err(|e| CallError::Negotiation(format!("remote answer rejected: {e:#}")))?;
        active.remote_applied = true;
        active.flush_pending().await;
        Ok(())
    }

    /// Candidates that arrive before the remote description are buffered
    /// and applied in arrival order once it is set.
    pub async fn add_remote_candidate(
        &mut self,
        candidate: NetworkCandidate,
    ) -> Result<CandidateIngest> {
        let Some(active) = self.active.as_mut() else {
            return Err(CallError::CandidateRejected(
                "no active connection".to_owned(),
            ));
        };

        if !active.remote_applied {
            if active.pending.len() >= MAX_PENDING_CANDIDATES {
                return Err(CallError::CandidateRejected(format!(
                    "{} candidates already pending",
                    MAX_PENDING_CANDIDATES
                )));
            }
            active.pending.push(candidate);
            return Ok(CandidateIngest::Buffered);
        }

        active
            .peer
            .add_ice_candidate(&candidate)
            .await
            .map_err(|e| CallError::CandidateRejected(format!("{e:#}")))?;
        Ok(CandidateIngest::Applied)
    }

    /// Closes the connection object only. Local media stays attached.
    pub async fn teardown(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Err(e) = active.peer.close().await {
            warn!("Peer connection {} closed with error: {:#}", active.generation, e);
        }
        self.media.reset_remote();
        info!("Peer connection {} closed", active.generation);
    }

    /// Closes the connection and stops all local media. Safe to repeat.
    /// Returns how many local tracks were stopped.
    pub async fn close(&mut self) -> usize {
        self.teardown().await;
        self.media.release_local()
    }

    fn active_mut(&mut self) -> Result<&mut ActiveConnection> {
        self.active
            .as_mut()
            .ok_or_else(|| CallError::Negotiation("no active connection".to_owned()))
    }
}
