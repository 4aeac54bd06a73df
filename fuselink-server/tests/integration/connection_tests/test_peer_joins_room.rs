use fuselink_core::RoomId;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{SILENCE_MS, TestPeer};

#[tokio::test]
async fn test_peer_joins_room() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::parse("abc").unwrap();
    assert!(!hub.contains_room(&room));

    let mut peer = TestPeer::join(&hub, "abc")
        .await
        .expect("Failed to admit peer");

    // admit returns only once the control loop has applied the join
    assert!(hub.contains_room(&room));
    assert_eq!(hub.member_count(&room), 1);
    assert_eq!(hub.room_count(), 1);

    // nobody else is in the room, so nothing arrives
    peer.expect_silence(SILENCE_MS).await.unwrap();
}

#[tokio::test]
async fn test_peers_in_different_rooms_are_counted_separately() {
    init_tracing();

    let hub = create_test_hub();
    let _a = TestPeer::join(&hub, "abc").await.unwrap();
    let _b = TestPeer::join(&hub, "abc").await.unwrap();
    let _c = TestPeer::join(&hub, "xyz").await.unwrap();

    assert_eq!(hub.room_count(), 2);
    assert_eq!(hub.peer_count(), 3);
    assert_eq!(hub.member_count(&RoomId::parse("abc").unwrap()), 2);
    assert_eq!(hub.member_count(&RoomId::parse("xyz").unwrap()), 1);
}
