// crates/caremesh-cli/src/commands/benchmark.rs
//
// `caremesh benchmark` — a participant's outcome trends against the
// anonymized network average.

use serde_json::json;

use crate::output::print_json;
use crate::rpc_client::{expect_result, rpc_call};

/// Run the benchmark command.
pub async fn run(endpoint: &str, participant: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(
        endpoint,
        "benchmark/get",
        json!({ "participantId": participant }),
    )
    .await?;
    print_json(&expect_result(response)?);
    Ok(())
}
