mod connection;
mod device;
mod envelope;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use device::DeviceId;
pub use envelope::{RoutingEnvelope, SignalMessage};
pub use room::RoomId;
pub use signaling::IceServerConfig;
