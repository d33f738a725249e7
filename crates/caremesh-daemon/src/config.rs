// crates/caremesh-daemon/src/config.rs
//
// Runtime configuration for the CareMesh daemon.
// Loaded from a TOML file or populated with sensible defaults. The
// participant roster is seeded from here at startup; further
// registrations arrive over RPC.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Port for the RPC server.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Participants registered at startup.
    #[serde(default)]
    pub participants: Vec<RosterEntry>,
}

/// One startup roster entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    /// Stable participant id (e.g. "A").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Initial opt-in state.
    #[serde(default)]
    pub opted_in: bool,
    /// Initial contribution percentage, 0-100.
    #[serde(default)]
    pub contribution_pct: u8,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    50061
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            participants: Vec::new(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: DaemonConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
