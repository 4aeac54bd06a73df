mod peer_connection;
mod peer_handle;

pub use peer_connection::PeerConnection;
pub use peer_handle::{DeviceSlot, PeerHandle};
