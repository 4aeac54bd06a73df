use fuselink_core::{RoomId, SignalMessage};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{SETTLE_TIMEOUT_MS, SILENCE_MS, TestPeer, wait_until};

#[tokio::test]
async fn test_identity_binding_first_wins() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::parse("abc").unwrap();
    let mut p1 = TestPeer::join(&hub, "abc").await.unwrap();
    let mut p2 = TestPeer::join(&hub, "abc").await.unwrap();

    p1.send(&SignalMessage::new("join", "first")).unwrap();
    p2.recv_text().await.unwrap();
    p1.send(&SignalMessage::new("rename", "second")).unwrap();
    p2.recv_text().await.unwrap();

    assert!(wait_until(|| hub.has_device(&room, "first"), SETTLE_TIMEOUT_MS).await);
    assert!(!hub.has_device(&room, "second"));

    // p2 targets the later id: nobody holds it
    p2.send(&SignalMessage::new("offer", "devP2").to("second"))
        .unwrap();
    p1.expect_silence(SILENCE_MS).await.unwrap();

    let offer = p2
        .send(&SignalMessage::new("offer", "devP2").to("first"))
        .unwrap();
    assert_eq!(p1.recv_text().await.unwrap(), offer);
}

#[tokio::test]
async fn test_empty_device_id_does_not_bind() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::parse("abc").unwrap();
    let mut p1 = TestPeer::join(&hub, "abc").await.unwrap();
    let mut p2 = TestPeer::join(&hub, "abc").await.unwrap();

    p1.send_text(r#"{"type":"hello","deviceId":""}"#).unwrap();
    p2.recv_text().await.unwrap();

    // a later non-empty id still binds
    p1.send(&SignalMessage::new("join", "dev1")).unwrap();
    p2.recv_text().await.unwrap();
    assert!(wait_until(|| hub.has_device(&room, "dev1"), SETTLE_TIMEOUT_MS).await);

    // an empty target matches no one, bound or not
    p2.send_text(r#"{"type":"offer","deviceId":"dev2","targetDeviceId":""}"#)
        .unwrap();
    p1.expect_silence(SILENCE_MS).await.unwrap();
}
