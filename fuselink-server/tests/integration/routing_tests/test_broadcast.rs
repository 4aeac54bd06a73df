use fuselink_core::SignalMessage;
use serde_json::json;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{SILENCE_MS, TestPeer};

#[tokio::test]
async fn test_broadcast_excludes_sender() {
    init_tracing();

    let hub = create_test_hub();
    let mut a = TestPeer::join(&hub, "xyz").await.unwrap();
    let mut b = TestPeer::join(&hub, "xyz").await.unwrap();
    let mut c = TestPeer::join(&hub, "xyz").await.unwrap();
    let mut outsider = TestPeer::join(&hub, "other").await.unwrap();

    let sent = a
        .send(&SignalMessage::new("join", "devA").with_data(json!({ "name": "Alice" })))
        .unwrap();

    // forwarded untouched
    assert_eq!(b.recv_text().await.unwrap(), sent);
    assert_eq!(c.recv_text().await.unwrap(), sent);

    a.expect_silence(SILENCE_MS).await.unwrap();
    outsider.expect_silence(SILENCE_MS).await.unwrap();
}

#[tokio::test]
async fn test_broadcast_preserves_unknown_fields() {
    init_tracing();

    let hub = create_test_hub();
    let a = TestPeer::join(&hub, "xyz").await.unwrap();
    let mut b = TestPeer::join(&hub, "xyz").await.unwrap();

    let raw = r#"{ "type" : "custom",  "deviceId":"devA", "extra": [1, 2, {"nested": true}] }"#;
    a.send_text(raw).unwrap();

    assert_eq!(b.recv_text().await.unwrap(), raw);
}

#[tokio::test]
async fn test_broadcast_to_lone_member_is_dropped() {
    init_tracing();

    let hub = create_test_hub();
    let mut a = TestPeer::join(&hub, "solo").await.unwrap();

    a.send(&SignalMessage::new("join", "devA")).unwrap();

    a.expect_silence(SILENCE_MS).await.unwrap();
}
