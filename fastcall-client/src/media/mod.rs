mod media_binder;
mod synthetic;

pub use media_binder::MediaBinder;
pub use synthetic::{LoggingRenderer, SyntheticCapture};

use anyhow::bail;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::{RTCRtpCodecCapability, RTPCodecType};
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;
use webrtc::track::track_remote::TrackRemote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl From<RTPCodecType> for MediaKind {
    fn from(kind: RTPCodecType) -> Self {
        match kind {
            RTPCodecType::Audio => MediaKind::Audio,
            _ => MediaKind::Video,
        }
    }
}

/// A locally captured track. Clones share the same live flag, so stopping
/// any clone stops them all.
#[derive(Clone)]
pub struct LocalTrack {
    kind: MediaKind,
    track: Arc<TrackLocalStaticSample>,
    live: Arc<AtomicBool>,
}

impl LocalTrack {
    pub fn new(kind: MediaKind, id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let capability = match kind {
            MediaKind::Audio => RTCRtpCodecCapability {
                mime_type: "audio/opus".to_owned(),
                clock_rate: 48000,
                channels: 2,
                sdp_fmtp_line: String::new(),
                rtcp_feedback: vec![],
            },
            MediaKind::Video => RTCRtpCodecCapability {
                mime_type: "video/VP8".to_owned(),
                clock_rate: 90000,
                channels: 0,
                sdp_fmtp_line: String::new(),
                rtcp_feedback: vec![],
            },
        };

        Self {
            kind,
            track: Arc::new(TrackLocalStaticSample::new(
                capability,
                id.into(),
                stream_id.into(),
            )),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> &str {
        self.track.id()
    }

    pub fn stream_id(&self) -> &str {
        self.track.stream_id()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually stopped the track.
    pub fn stop(&self) -> bool {
        self.live.swap(false, Ordering::AcqRel)
    }

    pub fn rtc_track(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }

    pub async fn write_sample(&self, data: Bytes, duration: Duration) -> anyhow::Result<()> {
        if !self.is_live() {
            bail!("track {} has been stopped", self.id());
        }
        self.track
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await?;
        Ok(())
    }
}

impl fmt::Debug for LocalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTrack")
            .field("id", &self.id())
            .field("stream_id", &self.stream_id())
            .field("kind", &self.kind)
            .field("live", &self.is_live())
            .finish()
    }
}

/// A track announced by the remote peer.
#[derive(Clone)]
pub struct RemoteTrack {
    id: String,
    stream_id: String,
    kind: MediaKind,
}

impl RemoteTrack {
    pub fn new(id: impl Into<String>, stream_id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            stream_id: stream_id.into(),
            kind,
        }
    }

    pub fn from_rtc(track: Arc<TrackRemote>) -> Self {
        Self {
            id: track.id(),
            stream_id: track.stream_id(),
            kind: MediaKind::from(track.kind()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

impl fmt::Debug for RemoteTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTrack")
            .field("id", &self.id)
            .field("stream_id", &self.stream_id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// All tracks received from the remote peer during one call.
#[derive(Clone, Default)]
pub struct RemoteStream {
    tracks: Arc<DashMap<String, RemoteTrack>>,
}

impl RemoteStream {
    pub fn add_track(&self, track: RemoteTrack) {
        self.tracks.insert(track.id().to_owned(), track);
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.contains_key(track_id)
    }

    pub fn track_ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl fmt::Debug for RemoteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStream")
            .field("tracks", &self.track_ids())
            .finish()
    }
}

/// Local capture device(s).
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> anyhow::Result<Vec<LocalTrack>>;
}

/// Presentation surface for the remote stream.
pub trait MediaRenderer: Send + Sync {
    fn attach(&self, stream: RemoteStream);
}
