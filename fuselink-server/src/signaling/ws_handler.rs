use crate::room::Hub;
use crate::signaling::AppState;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fuselink_core::RoomId;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{error, info};

/// `GET /ws/signaling/{room_id}`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let room = match RoomId::parse(room_id) {
        Ok(room) => room,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, room, hub))
}

/// `GET /ws/signaling/` without a room segment.
pub async fn missing_room() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, "Room ID required")
}

async fn handle_socket(socket: WebSocket, room: RoomId, hub: Hub) {
    let (sender, receiver) = socket.split();

    match hub.admit(room.clone(), sender, receiver).await {
        Ok(id) => info!("New WebSocket connection {} in room {}", id, room),
        Err(e) => error!("Could not admit connection into room {}: {}", room, e),
    }
}
