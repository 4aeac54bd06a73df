use crate::transport::PeerHandle;
use dashmap::DashMap;
use fuselink_core::{ConnectionId, RoomId};
use std::collections::HashMap;

type Members = HashMap<ConnectionId, PeerHandle>;

/// Room id -> current members.
///
/// Every call holds the room's shard lock for the duration of that call only,
/// so membership changes and routing lookups never observe a half-updated
/// room. Callers get owned snapshots and never hold a guard across an await.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Members>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, peer: PeerHandle) {
        self.rooms
            .entry(peer.room().clone())
            .or_default()
            .insert(peer.id(), peer);
    }

    /// Removes the member and, if it was the last one, the room itself, in a
    /// single locked step. `None` when the member was already gone.
    pub fn leave(&self, room: &RoomId, id: ConnectionId) -> Option<PeerHandle> {
        let mut removed = None;
        self.rooms.remove_if_mut(room, |_, members| {
            removed = members.remove(&id);
            members.is_empty()
        });
        removed
    }

    pub fn members(&self, room: &RoomId) -> Vec<PeerHandle> {
        self.rooms
            .get(room)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn find_device(&self, room: &RoomId, device: &str) -> Option<PeerHandle> {
        let members = self.rooms.get(room)?;
        members
            .values()
            .find(|peer| peer.device_id().is_some_and(|id| id == device))
            .cloned()
    }

    pub fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room: &RoomId) -> usize {
        self.rooms.get(room).map_or(0, |members| members.len())
    }

    pub fn peer_count(&self) -> usize {
        self.rooms.iter().map(|entry| entry.value().len()).sum()
    }
}
