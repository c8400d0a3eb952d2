use fastcall_client::NegotiationState;

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, Peer, settle};

#[tokio::test]
async fn test_early_candidates_are_buffered() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    alice.join("r1").await;
    let alice_id = alice.client_id();

    alice.engine.start(&mut alice.session).await.unwrap();

    relay.inject(
        &alice_id,
        r#"{"type":"candidate","candidate":"c1","sdpMid":"0","sdpMLineIndex":0}"#,
    );
    relay.inject(
        &alice_id,
        r#"{"type":"candidate","candidate":"c2","sdpMid":"1","sdpMLineIndex":1}"#,
    );
    settle(&mut [&mut alice]).await;

    assert_eq!(alice.session.pending_candidates().len(), 2);
    assert!(alice.connector.candidates_added().is_empty());

    relay.inject(&alice_id, r#"{"type":"answer","sdp":"v=0 answer bob 0"}"#);
    settle(&mut [&mut alice]).await;

    assert_eq!(alice.session.state(), NegotiationState::Connected);
    assert!(alice.session.pending_candidates().is_empty());
    let applied: Vec<_> = alice
        .connector
        .candidates_added()
        .into_iter()
        .map(|c| c.candidate)
        .collect();
    assert_eq!(applied, vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_candidate_before_any_connection_is_dropped() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    alice.join("r1").await;

    relay.inject(&alice.client_id(), r#"{"type":"candidate","candidate":"c1"}"#);
    settle(&mut [&mut alice]).await;

    assert_eq!(alice.session.state(), NegotiationState::Joined);
    assert!(alice.session.pending_candidates().is_empty());
    assert!(alice.connector.calls().is_empty());
}
