pub mod app;
pub mod config;
pub mod error;
mod room;
mod signaling;
mod transport;

pub use config::{HubConfig, ServerConfig, TurnConfig};
pub use error::{ConfigError, HubError};
pub use room::*;
pub use signaling::*;
pub use transport::*;
