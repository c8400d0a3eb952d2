use fastcall_client::{CallError, NegotiationState};

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, MockCapture, MockConnector, Peer, settle};

#[tokio::test]
async fn test_capture_failure_keeps_session_joined() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice =
        Peer::with_connector(&relay, MockConnector::new("alice"), MockCapture::failing());
    alice.join("r1").await;

    let err = alice.engine.start(&mut alice.session).await.unwrap_err();
    settle(&mut [&mut alice]).await;

    assert!(matches!(err, CallError::MediaAcquisition(_)));
    assert_eq!(alice.session.state(), NegotiationState::Joined);
    assert!(!alice.session.connection().is_active());
    assert!(relay.sent_by(&alice.client_id()).is_empty());
    assert!(alice.connector.calls().is_empty());
}

#[tokio::test]
async fn test_triggers_outside_a_room_are_invalid() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");

    let start = alice.engine.start(&mut alice.session).await.unwrap_err();
    let hangup = alice.engine.hangup(&mut alice.session).await.unwrap_err();

    assert!(matches!(start, CallError::InvalidState { op: "start", .. }));
    assert!(matches!(hangup, CallError::InvalidState { op: "hangup", .. }));
    assert_eq!(alice.session.state(), NegotiationState::Idle);
    assert!(alice.capture.issued().is_empty());
}
