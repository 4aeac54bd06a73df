use axum::extract::State;
use fuselink_core::IceServerConfig;
use fuselink_server::{AppState, ServerConfig, health, turn_credentials};
use std::sync::Arc;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_health_reports_live_counts() {
    init_tracing();

    let hub = create_test_hub();
    let state = Arc::new(AppState::new(hub.clone(), Vec::new()));

    let body = health(State(Arc::clone(&state))).await.0;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fuselink-server");
    assert_eq!(body["rooms"], 0);
    assert_eq!(body["peers"], 0);

    let _a = TestPeer::join(&hub, "abc").await.unwrap();
    let _b = TestPeer::join(&hub, "abc").await.unwrap();
    let _c = TestPeer::join(&hub, "xyz").await.unwrap();

    let body = health(State(state)).await.0;
    assert_eq!(body["rooms"], 2);
    assert_eq!(body["peers"], 3);
}

#[tokio::test]
async fn test_turn_credentials_lists_ice_servers() {
    init_tracing();

    let ice_servers = vec![
        IceServerConfig::stun("stun:stun.example.org:3478"),
        IceServerConfig {
            urls: vec!["turn:turn.example.org:3478".to_string()],
            username: Some("user".to_string()),
            credential: Some("secret".to_string()),
        },
    ];
    let state = Arc::new(AppState::new(create_test_hub(), ice_servers));

    let response = turn_credentials(State(state)).await.0;
    let body = serde_json::to_value(&response).unwrap();

    let servers = body["iceServers"].as_array().unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0]["urls"][0], "stun:stun.example.org:3478");
    assert!(servers[0].get("username").is_none());
    assert_eq!(servers[1]["username"], "user");
    assert_eq!(servers[1]["credential"], "secret");
}

#[tokio::test]
async fn test_default_config_serves_stun() {
    init_tracing();

    let state = Arc::new(AppState::from_config(&ServerConfig::default()));

    let response = turn_credentials(State(state)).await.0;
    assert_eq!(response.ice_servers.len(), 1);
    assert!(response.ice_servers[0].urls[0].starts_with("stun:"));
}
