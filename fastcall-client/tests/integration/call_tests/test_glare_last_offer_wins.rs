use fastcall_client::{CallError, NegotiationState};
use fastcall_core::{SdpKind, SignalMessage};

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, Peer, PeerCall, settle};

#[tokio::test]
async fn test_inbound_offer_replaces_pending_offer() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    alice.join("r1").await;
    let alice_id = alice.client_id();

    alice.engine.start(&mut alice.session).await.unwrap();
    assert_eq!(alice.session.state(), NegotiationState::Offering);

    alice
        .engine
        .handle_message(
            &mut alice.session,
            SignalMessage::Offer {
                sdp: "v=0 offer bob 0".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(alice.session.state(), NegotiationState::Answering);
    assert_eq!(alice.session.connection().generation(), Some(1));
    assert_eq!(alice.capture.live_tracks(), 2);

    let late = alice
        .engine
        .handle_message(
            &mut alice.session,
            SignalMessage::Answer {
                sdp: "v=0 answer bob 0".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(late, CallError::Negotiation(_)));
    assert_eq!(alice.session.state(), NegotiationState::Answering);

    settle(&mut [&mut alice]).await;

    assert_eq!(alice.session.state(), NegotiationState::Connected);
    let candidates: Vec<_> = relay
        .sent_by(&alice_id)
        .into_iter()
        .filter_map(|m| m.into_candidate())
        .collect();
    assert_eq!(candidates, vec![alice.connector.local_candidate(1)]);
}

#[tokio::test]
async fn test_simultaneous_start_leaves_both_answering() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    let mut bob = Peer::new(&relay, "bob");
    alice.join("r1").await;
    bob.join("r1").await;

    alice.engine.start(&mut alice.session).await.unwrap();
    bob.engine.start(&mut bob.session).await.unwrap();
    settle(&mut [&mut alice, &mut bob]).await;

    // Each side answered an offer whose connection the other side had
    // already replaced, so no answer is ever applied and no link forms.
    for peer in [&alice, &bob] {
        assert_eq!(peer.session.state(), NegotiationState::Answering);
        assert_eq!(peer.session.connection().generation(), Some(1));
        assert_eq!(relay.count_sent(&peer.client_id(), "offer"), 1);
        assert_eq!(relay.count_sent(&peer.client_id(), "answer"), 1);

        let answers_applied = peer
            .connector
            .calls()
            .into_iter()
            .filter(|(_, call)| matches!(call, PeerCall::SetRemote(SdpKind::Answer, _)))
            .count();
        assert_eq!(answers_applied, 0);
    }

    alice.engine.hangup(&mut alice.session).await.unwrap();
    settle(&mut [&mut alice, &mut bob]).await;
    assert_eq!(alice.session.state(), NegotiationState::Joined);
    assert_eq!(bob.session.state(), NegotiationState::Joined);

    alice.engine.start(&mut alice.session).await.unwrap();
    settle(&mut [&mut alice, &mut bob]).await;
    assert_eq!(alice.session.state(), NegotiationState::Connected);
    assert_eq!(bob.session.state(), NegotiationState::Connected);
}
