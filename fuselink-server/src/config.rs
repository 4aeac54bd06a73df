use crate::error::ConfigError;
use fuselink_core::IceServerConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    outbound_capacity: usize,
    close_timeout: Duration,
}

impl HubConfig {
    pub fn with_outbound_capacity(outbound_capacity: usize) -> Result<Self, ConfigError> {
        if outbound_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            outbound_capacity,
            ..Self::default()
        })
    }

    pub fn with_close_timeout(self, close_timeout: Duration) -> Self {
        Self {
            close_timeout,
            ..self
        }
    }

    /// Number of messages a peer may have waiting before it is evicted.
    pub fn outbound_capacity(&self) -> usize {
        self.outbound_capacity
    }

    /// How long a departed peer's socket gets to flush and take the Close
    /// frame before its writer is aborted.
    pub fn close_timeout(&self) -> Duration {
        self.close_timeout
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }
}

/// Optional TURN relay advertised next to the STUN servers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl TurnConfig {
    pub fn into_ice_server(self) -> Result<Option<IceServerConfig>, ConfigError> {
        match self.url {
            Some(url) => Ok(Some(IceServerConfig {
                urls: vec![url],
                username: self.username,
                credential: self.credential,
            })),
            None if self.username.is_some() || self.credential.is_some() => {
                Err(ConfigError::TurnWithoutUrl)
            }
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub hub: HubConfig,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub ice_servers: Vec<IceServerConfig>,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            hub: HubConfig::default(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_URL)],
        }
    }
}
