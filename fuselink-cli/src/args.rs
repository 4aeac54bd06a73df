use anyhow::Result;
use clap::Parser;
use fuselink_core::IceServerConfig;
use fuselink_server::config::{DEFAULT_OUTBOUND_CAPACITY, DEFAULT_PORT, DEFAULT_STUN_URL};
use fuselink_server::{HubConfig, ServerConfig, TurnConfig};
use std::net::{IpAddr, Ipv4Addr};

/// WebRTC signaling relay.
#[derive(Parser, Debug)]
#[command(name = "fuselink", version)]
pub struct Args {
    #[arg(long, env = "FUSELINK_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Messages a peer may have pending before it is disconnected.
    #[arg(long, env = "FUSELINK_OUTBOUND_CAPACITY", default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    pub outbound_capacity: usize,

    /// CORS origins allowed with credentials; pass an empty value to allow any origin.
    #[arg(
        long = "allowed-origin",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = ["http://localhost:3000".to_string(), "http://127.0.0.1:3000".to_string()]
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "stun-url", env = "STUN_URLS", value_delimiter = ',', default_values_t = [DEFAULT_STUN_URL.to_string()])]
    pub stun_urls: Vec<String>,

    #[arg(long, env = "TURN_URL")]
    pub turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME")]
    pub turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL", hide_env_values = true)]
    pub turn_credential: Option<String>,
}

impl Args {
    pub fn into_config(self) -> Result<ServerConfig> {
        let hub = HubConfig::with_outbound_capacity(self.outbound_capacity)?;

        let mut ice_servers: Vec<IceServerConfig> = self
            .stun_urls
            .into_iter()
            .filter(|url| !url.is_empty())
            .map(IceServerConfig::stun)
            .collect();

        let turn = TurnConfig {
            url: self.turn_url,
            username: self.turn_username,
            credential: self.turn_credential,
        };
        ice_servers.extend(turn.into_ice_server()?);

        Ok(ServerConfig {
            host: self.host,
            port: self.port,
            hub,
            allowed_origins: self
                .allowed_origins
                .into_iter()
                .filter(|origin| !origin.is_empty())
                .collect(),
            ice_servers,
        })
    }
}
