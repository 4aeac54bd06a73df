use crate::transport::PeerHandle;
use fuselink_core::{ConnectionId, RoomId};
use tokio::sync::oneshot;

/// Membership changes, applied one at a time by the hub control loop.
#[derive(Debug)]
pub(crate) enum HubCommand {
    /// Register a freshly accepted connection. `ack` fires once the peer is
    /// visible to routing.
    Admit {
        peer: PeerHandle,
        ack: oneshot::Sender<()>,
    },

    /// Unregister a connection: disconnect, read/write failure or eviction.
    Depart {
        room: RoomId,
        connection_id: ConnectionId,
    },
}
