pub mod error;
pub mod model;

pub use error::{EnvelopeError, RoomIdError};
pub use model::{
    ConnectionId, DeviceId, IceServerConfig, RoomId, RoutingEnvelope, SignalMessage,
};
