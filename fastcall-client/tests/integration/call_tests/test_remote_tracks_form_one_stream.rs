use fastcall_client::{MediaKind, RemoteTrack};

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, MockCapture, MockConnector, Peer, settle};

#[tokio::test]
async fn test_remote_tracks_form_one_stream() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    let connector = MockConnector::new("bob").with_remote_tracks(vec![
        RemoteTrack::new("alice-mic", "alice-stream", MediaKind::Audio),
        RemoteTrack::new("alice-cam", "alice-stream", MediaKind::Video),
    ]);
    let mut bob = Peer::with_connector(&relay, connector, MockCapture::new());
    alice.join("r1").await;
    bob.join("r1").await;

    alice.engine.start(&mut alice.session).await.unwrap();
    settle(&mut [&mut alice, &mut bob]).await;

    let attached = bob.renderer.attached();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].len(), 2);
    assert!(attached[0].contains("alice-cam"));
    assert_eq!(bob.session.remote_stream().map(|s| s.len()), Some(2));

    alice.engine.hangup(&mut alice.session).await.unwrap();
    settle(&mut [&mut alice, &mut bob]).await;

    assert!(bob.session.remote_stream().is_none());
}
