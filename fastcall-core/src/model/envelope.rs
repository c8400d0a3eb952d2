use crate::error::WireError;
use serde::Deserialize;

/// Message kinds the relay forwards between room members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayKind {
    Join,
    Offer,
    Answer,
    Candidate,
    Chat,
    Hangup,
}

impl RelayKind {
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "join" => Some(Self::Join),
            "offer" => Some(Self::Offer),
            "answer" => Some(Self::Answer),
            "candidate" => Some(Self::Candidate),
            "chat" => Some(Self::Chat),
            "hangup" => Some(Self::Hangup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Candidate => "candidate",
            Self::Chat => "chat",
            Self::Hangup => "hangup",
        }
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// The discriminator of a frame, read without interpreting the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kind: String,
}

impl Envelope {
    pub fn parse(text: &str) -> Result<Self, WireError> {
        let raw: RawEnvelope = serde_json::from_str(text)?;
        let kind = raw.kind.ok_or(WireError::MissingKind)?;
        Ok(Self { kind })
    }

    pub fn relay_kind(&self) -> Option<RelayKind> {
        RelayKind::from_kind(&self.kind)
    }
}
