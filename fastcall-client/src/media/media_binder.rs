use crate::connection::PeerConnection;
use crate::media::{LocalTrack, MediaRenderer, RemoteStream, RemoteTrack};
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

pub struct MediaBinder {
    renderer: Arc<dyn MediaRenderer>,
    local: Option<Vec<LocalTrack>>,
    remote: Option<RemoteStream>,
}

impl MediaBinder {
    pub fn new(renderer: Arc<dyn MediaRenderer>) -> Self {
        Self {
            renderer,
            local: None,
            remote: None,
        }
    }

    /// Takes ownership of captured tracks, stopping whatever was held before.
    pub fn set_local(&mut self, tracks: Vec<LocalTrack>) {
        self.release_local();
        self.local = Some(tracks);
    }

    /// `true` once capture has been attached, even if it produced no tracks.
    pub fn has_local_media(&self) -> bool {
        self.local.is_some()
    }

    pub fn local_tracks(&self) -> &[LocalTrack] {
        self.local.as_deref().unwrap_or(&[])
    }

    /// Adds every held local track to `peer`.
    pub async fn bind_local(&self, peer: &dyn PeerConnection) -> anyhow::Result<usize> {
        let tracks = self.local_tracks();
        for track in tracks {
            peer.add_track(track.rtc_track())
                .await
                .with_context(|| format!("failed to add {} track {}", track.kind(), track.id()))?;
            debug!(
                "Bound local {} track {} of stream {}",
                track.kind(),
                track.id(),
                track.stream_id()
            );
        }
        Ok(tracks.len())
    }

    /// Stops and forgets all local tracks. Returns how many were stopped.
    pub fn release_local(&mut self) -> usize {
        let Some(tracks) = self.local.take() else {
            return 0;
        };
        let stopped = tracks.iter().filter(|t| t.stop()).count();
        if stopped > 0 {
            info!("Stopped {} local track(s)", stopped);
        }
        stopped
    }

    /// Collects remote tracks into one stream. The renderer receives the
    /// stream once, when its first track arrives.
    pub fn on_remote_track(&mut self, track: RemoteTrack) {
        info!("Remote {} track {} arrived", track.kind(), track.id());
        match &self.remote {
            Some(stream) => stream.add_track(track),
            None => {
                let stream = RemoteStream::default();
                stream.add_track(track);
                self.renderer.attach(stream.clone());
                self.remote = Some(stream);
            }
        }
    }

    pub fn remote_stream(&self) -> Option<&RemoteStream> {
        self.remote.as_ref()
    }

    pub fn reset_remote(&mut self) {
        self.remote = None;
    }
}
