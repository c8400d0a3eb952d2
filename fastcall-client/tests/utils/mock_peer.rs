use anyhow::bail;
use async_trait::async_trait;
use fastcall_client::{
    ConnectionEvents, LinkState, PeerConnection, PeerConnector, RemoteTrack,
};
use fastcall_core::{NetworkCandidate, SdpKind, SessionDescription};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use webrtc::track::track_local::TrackLocal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCall {
    AddTrack(String),
    CreateOffer,
    CreateAnswer,
    SetRemote(SdpKind, String),
    AddCandidate(NetworkCandidate),
    Close,
}

/// Local descriptions published by mock connections, keyed by SDP.
///
/// When an offerer applies an answer found here, the link completes on both
/// ends, provided the answering connection is still open and answered that
/// very offer. Descriptions from outside the network (injected by a test)
/// have no far end to wait for.
#[derive(Clone, Default)]
pub struct MockNetwork {
    endpoints: Arc<Mutex<HashMap<String, Endpoint>>>,
}

#[derive(Clone)]
struct Endpoint {
    events: ConnectionEvents,
    flags: Arc<Mutex<Flags>>,
}

impl MockNetwork {
    fn publish(&self, sdp: &str, endpoint: Endpoint) {
        self.endpoints.lock().unwrap().insert(sdp.to_owned(), endpoint);
    }

    fn lookup(&self, sdp: &str) -> Option<Endpoint> {
        self.endpoints.lock().unwrap().get(sdp).cloned()
    }

    pub fn knows(&self, sdp: &str) -> bool {
        self.endpoints.lock().unwrap().contains_key(sdp)
    }
}

/// Connector whose connections behave like a browser peer without any
/// transport: descriptions are opaque strings and one local candidate is
/// "gathered" per local description. The link only reports connected once
/// an offer and its answer meet on the shared [`MockNetwork`].
#[derive(Clone)]
pub struct MockConnector {
    label: String,
    calls: Arc<Mutex<Vec<(u64, PeerCall)>>>,
    remote_tracks: Vec<RemoteTrack>,
    network: MockNetwork,
}

impl MockConnector {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            calls: Arc::new(Mutex::new(Vec::new())),
            remote_tracks: Vec::new(),
            network: MockNetwork::default(),
        }
    }

    pub fn on_network(mut self, network: MockNetwork) -> Self {
        self.network = network;
        self
    }

    /// Tracks announced whenever a remote description is applied.
    pub fn with_remote_tracks(mut self, tracks: Vec<RemoteTrack>) -> Self {
        self.remote_tracks = tracks;
        self
    }

    pub fn calls(&self) -> Vec<(u64, PeerCall)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn candidates_added(&self) -> Vec<NetworkCandidate> {
        self.calls()
            .into_iter()
            .filter_map(|(_, call)| match call {
                PeerCall::AddCandidate(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn local_candidate(&self, generation: u64) -> NetworkCandidate {
        NetworkCandidate {
            candidate: format!("candidate:{}-{}", self.label, generation),
            sdp_mid: Some("0".to_owned()),
            sdp_m_line_index: Some(0),
        }
    }
}

#[async_trait]
impl PeerConnector for MockConnector {
    async fn connect(&self, events: ConnectionEvents) -> anyhow::Result<Box<dyn PeerConnection>> {
        Ok(Box::new(MockPeer {
            connector: self.clone(),
            events,
            flags: Arc::new(Mutex::new(Flags::default())),
        }))
    }
}

#[derive(Default)]
struct Flags {
    local_sdp: Option<String>,
    remote_sdp: Option<String>,
    closed: bool,
}

struct MockPeer {
    connector: MockConnector,
    events: ConnectionEvents,
    flags: Arc<Mutex<Flags>>,
}

impl MockPeer {
    fn record(&self, call: PeerCall) {
        self.connector
            .calls
            .lock()
            .unwrap()
            .push((self.events.generation(), call));
    }

    fn ensure_open(&self) -> anyhow::Result<()> {
        if self.flags.lock().unwrap().closed {
            bail!("connection is closed");
        }
        Ok(())
    }

    fn publish(&self, sdp: &str) {
        self.flags.lock().unwrap().local_sdp = Some(sdp.to_owned());
        self.connector.network.publish(
            sdp,
            Endpoint {
                events: self.events.clone(),
                flags: self.flags.clone(),
            },
        );
    }

    /// Runs once the answer to our own `offer` is applied.
    async fn complete_link(&self, answer: &str, offer: &str) {
        let Some(far_end) = self.connector.network.lookup(answer) else {
            self.events.state(LinkState::Connected).await;
            return;
        };
        let matched = {
            let flags = far_end.flags.lock().unwrap();
            !flags.closed && flags.remote_sdp.as_deref() == Some(offer)
        };
        if matched {
            self.events.state(LinkState::Connected).await;
            far_end.events.state(LinkState::Connected).await;
        }
    }
}

#[async_trait]
impl PeerConnection for MockPeer {
    async fn add_track(&self, track: Arc<dyn TrackLocal + Send + Sync>) -> anyhow::Result<()> {
        self.ensure_open()?;
        self.record(PeerCall::AddTrack(track.id().to_owned()));
        Ok(())
    }

    async fn create_offer(&self) -> anyhow::Result<String> {
        self.ensure_open()?;
        self.record(PeerCall::CreateOffer);

        let generation = self.events.generation();
        let sdp = format!("v=0 offer {} {}", self.connector.label, generation);
        self.publish(&sdp);
        self.events
            .candidate(self.connector.local_candidate(generation))
            .await;
        Ok(sdp)
    }

    async fn create_answer(&self) -> anyhow::Result<String> {
        self.ensure_open()?;
        let Some(offer) = self.flags.lock().unwrap().remote_sdp.clone() else {
            bail!("no remote offer");
        };
        self.record(PeerCall::CreateAnswer);

        let generation = self.events.generation();
        let sdp = format!("v=0 answer {} {}", self.connector.label, generation);
        self.publish(&sdp);
        self.events
            .candidate(self.connector.local_candidate(generation))
            .await;
        if !self.connector.network.knows(&offer) {
            self.events.state(LinkState::Connected).await;
        }
        Ok(sdp)
    }

    async fn set_remote_description(&self, desc: &SessionDescription) -> anyhow::Result<()> {
        self.ensure_open()?;
        if desc.sdp().contains("malformed") {
            bail!("unparseable session description");
        }
        let local_sdp = {
            let mut flags = self.flags.lock().unwrap();
            flags.remote_sdp = Some(desc.sdp().to_owned());
            flags.local_sdp.clone()
        };
        self.record(PeerCall::SetRemote(desc.kind(), desc.sdp().to_owned()));

        for track in &self.connector.remote_tracks {
            self.events.track(track.clone()).await;
        }
        if desc.kind() == SdpKind::Answer
            && let Some(offer) = local_sdp
        {
            self.complete_link(desc.sdp(), &offer).await;
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &NetworkCandidate) -> anyhow::Result<()> {
        self.ensure_open()?;
        if self.flags.lock().unwrap().remote_sdp.is_none() {
            bail!("remote description is not set");
        }
        self.record(PeerCall::AddCandidate(candidate.clone()));
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.flags.lock().unwrap().closed = true;
        self.record(PeerCall::Close);
        Ok(())
    }
}
