use crate::signaling::AppState;
use axum::Json;
use axum::extract::State;
use fuselink_core::IceServerConfig;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

pub const SERVICE_NAME: &str = "fuselink-server";

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "rooms": state.hub.room_count(),
        "peers": state.hub.peer_count(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceServersResponse {
    pub ice_servers: Vec<IceServerConfig>,
}

/// `GET /api/turn-cred`: the static ICE server list.
pub async fn turn_credentials(State(state): State<Arc<AppState>>) -> Json<IceServersResponse> {
    Json(IceServersResponse {
        ice_servers: state.ice_servers.clone(),
    })
}
