use thiserror::Error;

/// Failures while reading a signaling frame off the wire.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed signaling frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("signaling frame has no `type` field")]
    MissingKind,

    #[error("unknown signaling message kind `{0}`")]
    UnknownKind(String),
}
