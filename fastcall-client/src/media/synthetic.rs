use crate::media::{LocalTrack, MediaKind, MediaRenderer, MediaSource, RemoteStream};
use async_trait::async_trait;
use bytes::Bytes;
use fastcall_core::ClientId;
use std::time::Duration;
use tracing::{debug, info};

/// One Opus frame of silence (TOC byte for a 20ms CELT frame, empty payload).
const OPUS_SILENCE: [u8; 3] = [0xf8, 0xff, 0xfe];
const OPUS_FRAME: Duration = Duration::from_millis(20);

/// Capture without devices. The audio track streams Opus silence until it is
/// stopped; the video track carries no samples.
#[derive(Debug, Clone)]
pub struct SyntheticCapture {
    pub audio: bool,
    pub video: bool,
}

impl Default for SyntheticCapture {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

#[async_trait]
impl MediaSource for SyntheticCapture {
    async fn acquire(&self) -> anyhow::Result<Vec<LocalTrack>> {
        let stream_id = format!("local-{}", ClientId::new());
        let mut tracks = Vec::new();
        if self.audio {
            let track = LocalTrack::new(MediaKind::Audio, "audio", &stream_id);
            tokio::spawn(stream_silence(track.clone()));
            tracks.push(track);
        }
        if self.video {
            tracks.push(LocalTrack::new(MediaKind::Video, "video", &stream_id));
        }
        Ok(tracks)
    }
}

async fn stream_silence(track: LocalTrack) {
    let mut ticker = tokio::time::interval(OPUS_FRAME);
    while track.is_live() {
        ticker.tick().await;
        let frame = Bytes::from_static(&OPUS_SILENCE);
        if let Err(e) = track.write_sample(frame, OPUS_FRAME).await {
            debug!("Silence on {} ended: {:#}", track.id(), e);
            return;
        }
    }
}

/// Renders a remote stream by announcing it in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRenderer;

impl MediaRenderer for LoggingRenderer {
    fn attach(&self, stream: RemoteStream) {
        info!("Remote stream attached: {:?}", stream.track_ids());
    }
}
