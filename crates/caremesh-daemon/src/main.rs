// crates/caremesh-daemon/src/main.rs
//
// Binary entrypoint for the CareMesh daemon.
//
// Initializes tracing, parses CLI arguments, loads configuration, seeds
// the startup roster, constructs shared state, and starts the RPC server.

mod config;
mod shared;

use clap::Parser;

use caremesh_core::{Participant, ParticipantStore};
use caremesh_rpc::{MeshRpcServer, RpcConfig};
use config::DaemonConfig;
use shared::MeshSharedState;

/// CareMesh daemon — serves the cross-clinic context-sharing engine.
#[derive(Parser, Debug)]
#[command(name = "caremesh-daemon", version = "0.1.0", about = "CareMesh node daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.caremesh/config.toml")]
    config: String,

    /// Override the configured RPC port.
    #[arg(long)]
    rpc_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from the TOML file, falling back to defaults if
    // the file is not found.
    let config_path = expand_tilde(&args.config);
    let load_result = DaemonConfig::load(&config_path);
    let mut daemon_config = match &load_result {
        Ok(config) => config.clone(),
        Err(_) => DaemonConfig::default(),
    };
    if let Some(port) = args.rpc_port {
        daemon_config.rpc_port = port;
    }

    // Initialize tracing; RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match load_result {
        Ok(_) => tracing::info!("Loaded configuration from {}", config_path),
        Err(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            config_path,
            e
        ),
    }

    tracing::info!("CareMesh Daemon v0.1.0");
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port
    );

    // Construct shared state and seed the startup roster.
    let shared_state = MeshSharedState::new();
    for entry in &daemon_config.participants {
        let participant = Participant {
            id: entry.id.clone(),
            name: entry.name.clone(),
            opted_in: entry.opted_in,
            contribution_pct: entry.contribution_pct,
        };
        match shared_state.participants.register(participant).await {
            Ok(()) => tracing::info!(
                "Seeded participant {} ({}%, optedIn={})",
                entry.id,
                entry.contribution_pct,
                entry.opted_in
            ),
            Err(e) => tracing::warn!("Skipping roster entry {}: {}", entry.id, e),
        }
    }

    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: daemon_config.rpc_port,
    };
    let rpc_server = MeshRpcServer::new(
        rpc_config,
        shared_state.participants.clone(),
        shared_state.records.clone(),
        shared_state.records.clone(),
        shared_state.events.clone(),
    )
    .with_start_time(shared_state.start_time);

    rpc_server.start().await?;

    tracing::info!("CareMesh daemon shut down");
    Ok(())
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}
