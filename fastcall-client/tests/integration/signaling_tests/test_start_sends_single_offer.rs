use fastcall_client::NegotiationState;

use crate::integration::init_tracing;
use crate::utils::{LoopbackRelay, Peer, settle};

#[tokio::test]
async fn test_start_sends_single_offer() {
    init_tracing();

    for room in ["r1", "lobby", "42"] {
        let relay = LoopbackRelay::new();
        let mut alice = Peer::new(&relay, "alice");
        alice.join(room).await;

        alice.engine.start(&mut alice.session).await.unwrap();
        settle(&mut [&mut alice]).await;

        let kinds = relay.sent_kinds(&alice.client_id());
        assert_eq!(kinds.first(), Some(&"offer"), "room {room}");
        assert_eq!(relay.count_sent(&alice.client_id(), "offer"), 1);
        assert_eq!(relay.count_sent(&alice.client_id(), "answer"), 0);
        assert_eq!(alice.session.state(), NegotiationState::Offering);
        assert_eq!(alice.session.local_track_count(), 2);
    }
}

#[tokio::test]
async fn test_local_tracks_are_bound_before_offer() {
    init_tracing();

    let relay = LoopbackRelay::new();
    let mut alice = Peer::new(&relay, "alice");
    alice.join("r1").await;

    alice.engine.start(&mut alice.session).await.unwrap();

    let calls: Vec<_> = alice.connector.calls().into_iter().map(|(_, c)| c).collect();
    let offer_at = calls
        .iter()
        .position(|c| *c == crate::utils::PeerCall::CreateOffer)
        .unwrap();
    let tracks_bound = calls[..offer_at]
        .iter()
        .filter(|c| matches!(c, crate::utils::PeerCall::AddTrack(_)))
        .count();
    assert_eq!(tracks_bound, 2);
}
