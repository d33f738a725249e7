// crates/caremesh-cli/src/main.rs
//
// CLI entrypoint for the CareMesh operator tools.
//
// Provides subcommands for the participant roster, patient intake,
// continue-care actions, the credits dashboard, outcome benchmarks, and
// daemon status.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::care::CareArgs;
use commands::intake::{IntakeArgs, RecordArgs};
use commands::participants::ParticipantsCmd;

/// CareMesh CLI — operator tools for the cross-clinic context network.
#[derive(Parser, Debug)]
#[command(
    name = "caremesh",
    version = "0.1.0",
    about = "CareMesh CLI — earned visibility and continuity credits for shared care"
)]
struct Cli {
    /// RPC endpoint of the caremesh-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50061")]
    rpc: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Participant roster: list, get, register, update settings.
    #[command(subcommand)]
    Participants(ParticipantsCmd),

    /// Run an intake check for a presented patient identity.
    Intake(IntakeArgs),

    /// Contribute a patient record at intake time.
    Record(RecordArgs),

    /// Record a continue-care action (awards continuity credits).
    Continue(CareArgs),

    /// Show the continuity-credits dashboard.
    Credits,

    /// Show a participant's outcome benchmark.
    Benchmark {
        /// Participant id to benchmark.
        #[arg(long)]
        participant: String,
    },

    /// Display daemon connection status.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Participants(cmd) => commands::participants::run(&cli.rpc, cmd).await?,
        Commands::Intake(args) => commands::intake::run_check(&cli.rpc, args).await?,
        Commands::Record(args) => commands::intake::run_record(&cli.rpc, args).await?,
        Commands::Continue(args) => commands::care::run(&cli.rpc, args).await?,
        Commands::Credits => commands::credits::run(&cli.rpc).await?,
        Commands::Benchmark { participant } => {
            commands::benchmark::run(&cli.rpc, participant).await?
        }
        Commands::Status => commands::status::run(&cli.rpc).await?,
    }

    Ok(())
}
