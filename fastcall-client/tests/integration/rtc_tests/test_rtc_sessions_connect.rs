use fastcall_client::{
    NegotiationEngine, NegotiationState, RtcConnector, Session, SyntheticCapture,
};
use std::sync::Arc;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, RecordingRenderer};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

struct RtcSide {
    engine: Arc<NegotiationEngine>,
    session: Session,
    renderer: RecordingRenderer,
}

/// Real WebRTC connections with host candidates only.
fn rtc_side(relay: &LoopbackRelay, capture: SyntheticCapture) -> RtcSide {
    let renderer = RecordingRenderer::default();
    let engine = Arc::new(NegotiationEngine::new(
        Arc::new(relay.clone()),
        Arc::new(RtcConnector::new(Vec::new())),
        Arc::new(capture),
        Arc::new(renderer.clone()),
    ));
    let session = engine.new_session();
    RtcSide {
        engine,
        session,
        renderer,
    }
}

async fn drive_until(
    sides: &mut [&mut RtcSide],
    done: impl Fn(&[&mut RtcSide]) -> bool,
) -> bool {
    let deadline = tokio::time::Instant::now() + CONNECT_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        for side in sides.iter_mut() {
            side.engine.drain_pending(&mut side.session).await;
        }
        if done(sides) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rtc_sessions_connect() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = rtc_side(
        &relay,
        SyntheticCapture {
            audio: true,
            video: false,
        },
    );
    let mut bob = rtc_side(&relay, SyntheticCapture::default());

    alice.engine.join(&mut alice.session, "r1").await.unwrap();
    bob.engine.join(&mut bob.session, "r1").await.unwrap();
    alice.engine.start(&mut alice.session).await.unwrap();

    // Bob only leaves Answering on a connected report from his connection,
    // and only renders once RTP from Alice's audio track reaches him.
    let connected = drive_until(&mut [&mut alice, &mut bob], |sides| {
        sides[0].session.state() == NegotiationState::Connected
            && sides[1].session.state() == NegotiationState::Connected
            && !sides[1].renderer.attached().is_empty()
    })
    .await;
    assert!(connected, "sessions did not connect over host candidates");

    assert_eq!(alice.session.local_track_count(), 1);
    assert_eq!(bob.session.local_track_count(), 0);
    assert!(alice.session.pending_candidates().is_empty());
    assert!(bob.session.pending_candidates().is_empty());

    let attached = bob.renderer.attached();
    assert_eq!(attached.len(), 1);
    assert!(attached[0].contains("audio"));

    for side in [&alice, &bob] {
        let client = side.session.client_id().cloned().unwrap();
        let candidates: Vec<_> = relay
            .sent_by(&client)
            .into_iter()
            .filter_map(|m| m.into_candidate())
            .collect();
        assert!(!candidates.is_empty());
        for candidate in candidates {
            assert!(candidate.candidate.starts_with("candidate:"));
            assert!(candidate.sdp_mid.is_some());
            assert_eq!(candidate.sdp_m_line_index, Some(0));
        }
    }

    alice.engine.hangup(&mut alice.session).await.unwrap();
    let closed = drive_until(&mut [&mut alice, &mut bob], |sides| {
        sides.iter().all(|s| s.session.state() == NegotiationState::Joined)
    })
    .await;
    assert!(closed);
    assert!(!bob.session.connection().is_active());
}
