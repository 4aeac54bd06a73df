use axum::extract::ws::Utf8Bytes;
use fuselink_core::{ConnectionId, DeviceId, RoomId};
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

/// Device identity slot shared between a connection's inbound pump (writer)
/// and the registry (readers). Written at most once.
pub type DeviceSlot = Arc<OnceLock<DeviceId>>;

/// Registry entry for one admitted connection.
///
/// The registry holds the only long-lived clone of `outbound`; routing takes
/// short-lived clones through [`RoomRegistry::members`](crate::room::RoomRegistry::members).
/// Once the registry drops its entry the queue closes and the outbound pump
/// finishes with a Close frame. `departed` fires at the same moment so the
/// connection stops reading.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    id: ConnectionId,
    room: RoomId,
    device_id: DeviceSlot,
    outbound: mpsc::Sender<Utf8Bytes>,
    departed: CancellationToken,
}

impl PeerHandle {
    pub fn new(room: RoomId, capacity: usize) -> (Self, mpsc::Receiver<Utf8Bytes>) {
        let (outbound, rx) = mpsc::channel(capacity);
        let handle = Self {
            id: ConnectionId::new(),
            room,
            device_id: Arc::new(OnceLock::new()),
            outbound,
            departed: CancellationToken::new(),
        };
        (handle, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn device_id(&self) -> Option<&DeviceId> {
        self.device_id.get()
    }

    pub(crate) fn device_slot(&self) -> DeviceSlot {
        Arc::clone(&self.device_id)
    }

    pub(crate) fn departure(&self) -> CancellationToken {
        self.departed.clone()
    }

    /// Tells the connection it is no longer a member.
    pub(crate) fn mark_departed(&self) {
        self.departed.cancel();
    }

    /// Binds the identity unless one is already bound. Returns whether this
    /// call performed the binding.
    pub fn bind_device(&self, device: &str) -> bool {
        bind_device(&self.device_id, device)
    }

    /// Offer a message without waiting for queue space.
    pub fn try_enqueue(&self, message: Utf8Bytes) -> Result<(), TrySendError<Utf8Bytes>> {
        self.outbound.try_send(message)
    }
}

pub(crate) fn bind_device(slot: &OnceLock<DeviceId>, device: &str) -> bool {
    if device.is_empty() || slot.get().is_some() {
        return false;
    }
    slot.set(DeviceId::from(device)).is_ok()
}
