mod control_loop;
mod hub;
mod hub_command;
mod room_registry;
mod router;

pub use hub::*;
pub use room_registry::*;
pub use router::*;
