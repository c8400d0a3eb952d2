use crate::model::signaling::SignalMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// An offer or answer. The SDP payload is opaque to the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    kind: SdpKind,
    sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp: sdp.into(),
        }
    }

    pub fn kind(&self) -> SdpKind {
        self.kind
    }

    pub fn sdp(&self) -> &str {
        &self.sdp
    }
}

impl From<SessionDescription> for SignalMessage {
    fn from(desc: SessionDescription) -> Self {
        match desc.kind {
            SdpKind::Offer => SignalMessage::Offer { sdp: desc.sdp },
            SdpKind::Answer => SignalMessage::Answer { sdp: desc.sdp },
        }
    }
}

/// One network path proposed by a peer (trickle ICE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

impl From<NetworkCandidate> for SignalMessage {
    fn from(c: NetworkCandidate) -> Self {
        SignalMessage::Candidate {
            candidate: c.candidate,
            sdp_mid: c.sdp_mid,
            sdp_m_line_index: c.sdp_m_line_index,
        }
    }
}
