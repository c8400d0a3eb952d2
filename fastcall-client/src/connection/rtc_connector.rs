use crate::connection::{ConnectionEvents, LinkState, PeerConnection, PeerConnector};
use crate::media::RemoteTrack;
use async_trait::async_trait;
use fastcall_core::{IceServerConfig, NetworkCandidate, SdpKind, SessionDescription};
use std::sync::Arc;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// Builds real WebRTC connections.
#[derive(Debug, Clone)]
pub struct RtcConnector {
    ice_servers: Vec<IceServerConfig>,
}

impl RtcConnector {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self { ice_servers }
    }
}

#[async_trait]
impl PeerConnector for RtcConnector {
    async fn connect(&self, events: ConnectionEvents) -> anyhow::Result<Box<dyn PeerConnection>> {
        Ok(Box::new(RtcPeer::new(&self.ice_servers, events).await?))
    }
}

pub struct RtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeer {
    pub async fn new(
        ice_servers: &[IceServerConfig],
        events: ConnectionEvents,
    ) -> anyhow::Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);
        let generation = events.generation();

        let state_events = events.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let events = state_events.clone();
                Box::pin(async move {
                    info!("Peer connection {} state changed: {:?}", generation, s);
                    events.state(LinkState::from(s)).await;
                })
            },
        ));

        let ice_events = events.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let events = ice_events.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let json = match candidate.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize local candidate: {}", e);
                        return;
                    }
                };
                events
                    .candidate(NetworkCandidate {
                        candidate: json.candidate,
                        sdp_mid: json.sdp_mid,
                        sdp_m_line_index: json.sdp_mline_index,
                    })
                    .await;
            })
        }));

        let track_events = events;
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let events = track_events.clone();
            Box::pin(async move {
                debug!("Remote track {} announced on connection {}", track.id(), generation);
                events.track(RemoteTrack::from_rtc(track)).await;
            })
        }));

        Ok(Self { peer_connection })
    }
}

#[async_trait]
impl PeerConnection for RtcPeer {
    async fn add_track(&self, track: Arc<dyn TrackLocal + Send + Sync>) -> anyhow::Result<()> {
        self.peer_connection.add_track(track).await?;
        Ok(())
    }

    async fn create_offer(&self) -> anyhow::Result<String> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(offer.sdp)
    }

    async fn create_answer(&self) -> anyhow::Result<String> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(answer.sdp)
    }

    async fn set_remote_description(&self, desc: &SessionDescription) -> anyhow::Result<()> {
        let sdp = desc.sdp().to_owned();
        let desc = match desc.kind() {
            SdpKind::Offer => RTCSessionDescription::offer(sdp)?,
            SdpKind::Answer => RTCSessionDescription::answer(sdp)?,
        };
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &NetworkCandidate) -> anyhow::Result<()> {
        self.peer_connection
            .add_ice_candidate(RTCIceCandidateInit {
                candidate: candidate.candidate.clone(),
                sdp_mid: candidate.sdp_mid.clone(),
                sdp_mline_index: candidate.sdp_m_line_index,
                username_fragment: None,
            })
            .await?;
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
