use fastcall_core::IceServerConfig;
use fastcall_core::utils::default_ice_servers;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay base URL; the `/ws/{room}/{client}` path is appended per join.
    pub signaling_url: String,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            signaling_url: "ws://localhost:8000".to_owned(),
            ice_servers: default_ice_servers(),
        }
    }
}
