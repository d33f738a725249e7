// crates/caremesh-cli/src/commands/credits.rs
//
// `caremesh credits` — the continuity-credits dashboard.

use serde_json::json;
use tabled::Tabled;

use crate::output::{print_json, print_table};
use crate::rpc_client::{expect_result, rpc_call};

/// One totals row for table output.
#[derive(Tabled)]
struct CreditRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Credits")]
    credits: u64,
}

/// Run the credits dashboard command.
pub async fn run(endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(endpoint, "credits/dashboard", json!({})).await?;
    let result = expect_result(response)?;

    let mut rows: Vec<CreditRow> = result["creditsByParticipant"]
        .as_object()
        .map(|totals| {
            totals
                .iter()
                .map(|(participant, credits)| CreditRow {
                    participant: participant.clone(),
                    credits: credits.as_u64().unwrap_or(0),
                })
                .collect()
        })
        .unwrap_or_default();
    rows.sort_by(|a, b| a.participant.cmp(&b.participant));
    print_table(rows);

    println!("Recent events:");
    print_json(&result["recentEvents"]);
    Ok(())
}
