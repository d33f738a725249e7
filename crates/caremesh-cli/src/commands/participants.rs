// crates/caremesh-cli/src/commands/participants.rs
//
// `caremesh participants` — roster listing, lookup, registration, and
// settings updates.

use clap::Subcommand;
use serde_json::json;
use tabled::Tabled;

use crate::output::{print_json, print_table};
use crate::rpc_client::{expect_result, rpc_call};

/// Participant roster subcommands.
#[derive(Debug, Subcommand)]
pub enum ParticipantsCmd {
    /// List all participants with derived levels and badges.
    List,

    /// Show one participant.
    Get {
        /// Participant id.
        id: String,
    },

    /// Register a new participant.
    Register {
        /// Participant id.
        id: String,
        /// Display name.
        #[arg(long)]
        name: String,
        /// Opt into sharing immediately.
        #[arg(long)]
        opted_in: bool,
        /// Contribution percentage, 0-100.
        #[arg(long, default_value_t = 0)]
        contribution_pct: i64,
    },

    /// Update a participant's sharing settings.
    Update {
        /// Participant id.
        id: String,
        /// New opt-in state.
        #[arg(long)]
        opted_in: bool,
        /// New contribution percentage, 0-100.
        #[arg(long)]
        contribution_pct: i64,
    },
}

/// One roster row for table output.
#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Opted In")]
    opted_in: bool,
    #[tabled(rename = "Contribution %")]
    contribution_pct: u64,
    #[tabled(rename = "Level")]
    context_level: u64,
    #[tabled(rename = "Status")]
    network_status: String,
}

fn row_from_value(value: &serde_json::Value) -> ParticipantRow {
    ParticipantRow {
        id: value["id"].as_str().unwrap_or_default().to_string(),
        name: value["name"].as_str().unwrap_or_default().to_string(),
        opted_in: value["optedIn"].as_bool().unwrap_or(false),
        contribution_pct: value["contributionPct"].as_u64().unwrap_or(0),
        context_level: value["contextLevel"].as_u64().unwrap_or(0),
        network_status: value["networkStatus"].as_str().unwrap_or_default().to_string(),
    }
}

/// Run a participants subcommand.
pub async fn run(endpoint: &str, cmd: &ParticipantsCmd) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ParticipantsCmd::List => {
            let response = rpc_call(endpoint, "participants/list", json!({})).await?;
            let result = expect_result(response)?;
            let rows: Vec<ParticipantRow> = result
                .as_array()
                .map(|items| items.iter().map(row_from_value).collect())
                .unwrap_or_default();
            print_table(rows);
        }
        ParticipantsCmd::Get { id } => {
            let response =
                rpc_call(endpoint, "participants/get", json!({ "participantId": id })).await?;
            print_json(&expect_result(response)?);
        }
        ParticipantsCmd::Register {
            id,
            name,
            opted_in,
            contribution_pct,
        } => {
            let response = rpc_call(
                endpoint,
                "participants/register",
                json!({
                    "id": id,
                    "name": name,
                    "optedIn": opted_in,
                    "contributionPct": contribution_pct,
                }),
            )
            .await?;
            print_json(&expect_result(response)?);
        }
        ParticipantsCmd::Update {
            id,
            opted_in,
            contribution_pct,
        } => {
            let response = rpc_call(
                endpoint,
                "participants/update",
                json!({
                    "participantId": id,
                    "optedIn": opted_in,
                    "contributionPct": contribution_pct,
                }),
            )
            .await?;
            print_json(&expect_result(response)?);
        }
    }

    Ok(())
}
