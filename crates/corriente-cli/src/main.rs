//! Corriente CLI - stream audio between devices and a polling pipeline.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "corriente")]
#[command(author, version, about = "Timestamped audio transport between devices and a polling pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available audio devices
    Devices,

    /// Route the input device to the output device
    Passthrough(commands::passthrough::PassthroughArgs),

    /// Play a generated tone on the output device
    Tone(commands::tone::ToneArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Devices => commands::devices::run(),
        Commands::Passthrough(args) => commands::passthrough::run(args),
        Commands::Tone(args) => commands::tone::run(args),
    }
}
