use fuselink_core::{RoomId, SignalMessage};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{SETTLE_TIMEOUT_MS, SILENCE_MS, TestPeer, wait_until};

#[tokio::test]
async fn test_binary_frames_are_routed() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::parse("abc").unwrap();
    let a = TestPeer::join(&hub, "abc").await.unwrap();
    let mut b = TestPeer::join(&hub, "abc").await.unwrap();

    let json = SignalMessage::new("join", "devA").to_json().unwrap();
    a.send_binary(json.clone().into_bytes()).unwrap();

    // delivered as text
    assert_eq!(b.recv_text().await.unwrap(), json);
    assert!(wait_until(|| hub.has_device(&room, "devA"), SETTLE_TIMEOUT_MS).await);
}

#[tokio::test]
async fn test_invalid_utf8_binary_is_dropped() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::parse("abc").unwrap();
    let a = TestPeer::join(&hub, "abc").await.unwrap();
    let mut b = TestPeer::join(&hub, "abc").await.unwrap();

    a.send_binary(vec![0xff, 0xfe, 0x7b]).unwrap();
    b.expect_silence(SILENCE_MS).await.unwrap();
    assert_eq!(hub.member_count(&room), 2);

    let valid = a.send(&SignalMessage::new("ping", "devA")).unwrap();
    assert_eq!(b.recv_text().await.unwrap(), valid);
}
