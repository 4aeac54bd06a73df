use crate::room::hub_command::HubCommand;
use crate::room::room_registry::RoomRegistry;
use crate::transport::PeerHandle;
use axum::extract::ws::Utf8Bytes;
use fuselink_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Result of a targeted send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Delivered,
    /// The target's queue was full; it has been evicted.
    QueueFull,
    /// The target's queue was already closed; its departure is under way.
    Departed,
    NotFound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub evicted: usize,
}

enum Offer {
    Enqueued,
    Evicted,
    Closed,
}

/// Delivers raw frames to room members. Reads the registry directly; the
/// only write it can cause (eviction) is handed to the control loop.
#[derive(Debug, Clone)]
pub struct SignalRouter {
    registry: Arc<RoomRegistry>,
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl SignalRouter {
    pub(crate) fn new(
        registry: Arc<RoomRegistry>,
        commands: mpsc::UnboundedSender<HubCommand>,
    ) -> Self {
        Self { registry, commands }
    }

    /// Offer `message` to every member of `room` except `sender`.
    pub fn broadcast(
        &self,
        room: &RoomId,
        sender: ConnectionId,
        message: &Utf8Bytes,
    ) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for member in self.registry.members(room) {
            if member.id() == sender {
                continue;
            }
            match self.offer(&member, message) {
                Offer::Enqueued => report.delivered += 1,
                Offer::Evicted => report.evicted += 1,
                Offer::Closed => {}
            }
        }

        report
    }

    /// Offer `message` to the member of `room` bound to `target`.
    pub fn send_to_device(&self, room: &RoomId, target: &str, message: &Utf8Bytes) -> RouteOutcome {
        let Some(member) = self.registry.find_device(room, target) else {
            return RouteOutcome::NotFound;
        };

        match self.offer(&member, message) {
            Offer::Enqueued => RouteOutcome::Delivered,
            Offer::Evicted => RouteOutcome::QueueFull,
            Offer::Closed => RouteOutcome::Departed,
        }
    }

    fn offer(&self, member: &PeerHandle, message: &Utf8Bytes) -> Offer {
        match member.try_enqueue(message.clone()) {
            Ok(()) => Offer::Enqueued,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Outbound queue of {} in room {} is full, evicting",
                    member.id(),
                    member.room()
                );
                self.evict(member);
                Offer::Evicted
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Dropping message for departed peer {}", member.id());
                Offer::Closed
            }
        }
    }

    fn evict(&self, member: &PeerHandle) {
        let cmd = HubCommand::Depart {
            room: member.room().clone(),
            connection_id: member.id(),
        };
        if self.commands.send(cmd).is_err() {
            warn!("Hub control loop is gone, cannot evict {}", member.id());
        }
    }
}
