// crates/caremesh-cli/src/commands/care.rs
//
// `caremesh continue` — record a continue-care action for a patient.

use clap::Args;
use serde_json::json;

use crate::output::print_json;
use crate::rpc_client::{expect_result, rpc_call};

/// Arguments for a continue-care action.
#[derive(Debug, Args)]
pub struct CareArgs {
    /// Reusing participant id.
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

/// Run the continue-care command.
pub async fn run(endpoint: &str, args: &CareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(
        endpoint,
        "care/continue",
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
