use crate::room::hub_command::HubCommand;
use crate::room::room_registry::RoomRegistry;
use fuselink_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single writer of room membership. Commands are applied strictly in
/// arrival order.
pub(crate) struct ControlLoop {
    registry: Arc<RoomRegistry>,
    command_rx: mpsc::UnboundedReceiver<HubCommand>,
}

impl ControlLoop {
    pub(crate) fn new(
        registry: Arc<RoomRegistry>,
        command_rx: mpsc::UnboundedReceiver<HubCommand>,
    ) -> Self {
        Self {
            registry,
            command_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("Hub control loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Hub control loop finished");
    }

    fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Admit { peer, ack } => {
                let room = peer.room().clone();
                let id = peer.id();

                if !self.registry.contains_room(&room) {
                    info!("Creating new room: {}", room);
                }
                self.registry.join(peer);

                info!(
                    "Peer {} registered in room {} ({} members)",
                    id,
                    room,
                    self.registry.member_count(&room)
                );

                // Without a task to run its pumps the peer would never leave.
                if ack.send(()).is_err() {
                    debug!("No connection task is waiting for {}, removing it", id);
                    self.remove_peer(&room, id);
                }
            }

            HubCommand::Depart {
                room,
                connection_id,
            } => self.remove_peer(&room, connection_id),
        }
    }

    fn remove_peer(&mut self, room: &RoomId, connection_id: ConnectionId) {
        // Dropping the handle drops the registry's sender and closes the queue.
        let Some(peer) = self.registry.leave(room, connection_id) else {
            debug!("Peer {} already left room {}", connection_id, room);
            return;
        };
        peer.mark_departed();

        info!("Peer {} unregistered from room {}", connection_id, room);
        if !self.registry.contains_room(room) {
            info!("Room {} is empty, removed", room);
        }
    }
}
