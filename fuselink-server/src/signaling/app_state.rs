use crate::config::ServerConfig;
use crate::room::Hub;
use fuselink_core::IceServerConfig;

/// Shared state behind every route.
pub struct AppState {
    pub hub: Hub,
    pub ice_servers: Vec<IceServerConfig>,
}

impl AppState {
    pub fn new(hub: Hub, ice_servers: Vec<IceServerConfig>) -> Self {
        Self { hub, ice_servers }
    }

    /// Starts a hub for `config`. Requires a running Tokio runtime.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Hub::new(config.hub), config.ice_servers.clone())
    }
}
