use crate::engine::NegotiationState;
use thiserror::Error;

/// Everything a call can fail with, as seen by the trigger that caused it.
#[derive(Debug, Error)]
pub enum CallError {
    /// The relay could not be reached. Fatal to `join`.
    #[error("signaling channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// Local capture failed. Fatal to `start`.
    #[error("media acquisition failed: {0}")]
    MediaAcquisition(String),

    /// A description operation was invalid for the current connection.
    /// Aborts the current negotiation attempt only.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// A remote candidate could not be ingested. Never fatal.
    #[error("candidate rejected: {0}")]
    CandidateRejected(String),

    #[error("`{op}` is not allowed while {state}")]
    InvalidState {
        op: &'static str,
        state: NegotiationState,
    },

    #[error("room name must not be empty")]
    InvalidRoom,

    #[error("session task has stopped")]
    SessionGone,
}

pub type Result<T> = std::result::Result<T, CallError>;
