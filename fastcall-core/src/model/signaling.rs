use crate::error::WireError;
use crate::model::description::{NetworkCandidate, SessionDescription};
use crate::model::envelope::Envelope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Peer-to-peer signaling frame, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalMessage {
    Offer {
        sdp: String,
    },
    Answer {
        sdp: String,
    },
    Candidate {
        candidate: String,
        #[serde(rename = "sdpMid")]
        sdp_mid: Option<String>,
        #[serde(rename = "sdpMLineIndex")]
        sdp_m_line_index: Option<u16>,
    },
    Hangup,
}

impl SignalMessage {
    pub const KINDS: [&'static str; 4] = ["offer", "answer", "candidate", "hangup"];

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::Candidate { .. } => "candidate",
            Self::Hangup => "hangup",
        }
    }

    pub fn encode(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a frame. A well-formed frame of a kind this side does not
    /// speak yields `UnknownKind` rather than `Malformed`.
    pub fn decode(text: &str) -> Result<Self, WireError> {
        let envelope = Envelope::parse(text)?;
        if !Self::KINDS.contains(&envelope.kind.as_str()) {
            return Err(WireError::UnknownKind(envelope.kind));
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_description(self) -> Option<SessionDescription> {
        match self {
            Self::Offer { sdp } => Some(SessionDescription::offer(sdp)),
            Self::Answer { sdp } => Some(SessionDescription::answer(sdp)),
            _ => None,
        }
    }

    pub fn into_candidate(self) -> Option<NetworkCandidate> {
        match self {
            Self::Candidate {
                candidate,
                sdp_mid,
                sdp_m_line_index,
            } => Some(NetworkCandidate {
                candidate,
                sdp_mid,
                sdp_m_line_index,
            }),
            _ => None,
        }
    }
}
