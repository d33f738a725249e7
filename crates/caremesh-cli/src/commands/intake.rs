// crates/caremesh-cli/src/commands/intake.rs
//
// `caremesh intake` and `caremesh record` — intake checks and record
// contribution.

use clap::Args;
use serde_json::json;

use crate::output::print_json;
use crate::rpc_client::{expect_result, rpc_call};

/// Arguments identifying a requester and a presented patient.
#[derive(Debug, Args)]
pub struct IntakeArgs {
    /// Requesting participant id.
    #[arg(long)]
    pub participant: String,

    /// Patient full name.
    #[arg(long)]
    pub name: String,

    /// Patient date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub dob: String,

    /// Last four digits of the patient's phone number.
    #[arg(long)]
    pub phone: String,
}

/// Arguments for contributing a patient record.
#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub identity: IntakeArgs,

    /// Episode start date, YYYY-MM-DD.
    #[arg(long)]
    pub start: String,

    /// Episode end date, YYYY-MM-DD.
    #[arg(long)]
    pub end: String,

    /// Conditions (repeatable).
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Intervention categories (repeatable).
    #[arg(long = "intervention")]
    pub interventions: Vec<String>,

    /// Response trend: improving, plateau, or worse.
    #[arg(long)]
    pub trend: Option<String>,

    /// Red flags (repeatable).
    #[arg(long = "red-flag")]
    pub red_flags: Vec<String>,

    /// Timeline bullets (repeatable).
    #[arg(long = "timeline")]
    pub timeline: Vec<String>,
}

/// Run an intake check and print the composite report.
pub async fn run_check(endpoint: &str, args: &IntakeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(
        endpoint,
        "intake/check",
        json!({
            "participantId": args.participant,
            "fullName": args.name,
            "dob": args.dob,
            "phoneLast4": args.phone,
        }),
    )
    .await?;
    print_json(&expect_result(response)?);
    Ok(())
}

/// Contribute a record and print its id and fingerprint.
pub async fn run_record(endpoint: &str, args: &RecordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(
        endpoint,
        "intake/record",
        json!({
            "participantId": args.identity.participant,
            "fullName": args.identity.name,
            "dob": args.identity.dob,
            "phoneLast4": args.identity.phone,
            "startDate": args.start,
            "endDate": args.end,
            "conditions": args.conditions,
            "interventions": args.interventions,
            "responseTrend": args.trend,
            "redFlags": args.red_flags,
            "timeline": args.timeline,
        }),
    )
    .await?;
    print_json(&expect_result(response)?);
    Ok(())
}
