// crates/caremesh-cli/src/commands/status.rs
//
// `caremesh status` — daemon connection status.

use serde_json::json;

use crate::rpc_client::{expect_result, rpc_call};

/// Run the status command.
pub async fn run(endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("CareMesh v0.1.0");
    println!();
    match rpc_call(endpoint, "node/health", json!({})).await {
        Ok(response) => {
            let health = expect_result(response)?;
            println!("Node Status");
            println!("-----------");
            println!("  RPC endpoint: {}", endpoint);
            println!("  Status:       {}", health["status"].as_str().unwrap_or("unknown"));
            println!("  Uptime:       {}s", health["uptimeSecs"].as_u64().unwrap_or(0));
            println!(
                "  Participants: {}",
                health["participantCount"].as_u64().unwrap_or(0)
            );
        }
        Err(e) => {
            println!("Node Status");
            println!("-----------");
            println!("  RPC endpoint: {}", endpoint);
            println!("  Connection:   failed ({})", e);
        }
    }
    Ok(())
}
