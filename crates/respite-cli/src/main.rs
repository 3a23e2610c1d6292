use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod intent;
mod terminal;

#[derive(Parser)]
#[command(name = "respite", version, about = "Respite break reminder")]
struct Cli {
    /// Configuration file (defaults to $RESPITE_CONFIG or ~/.config/respite/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the break cycle in this terminal; intents are read from stdin
    Run(commands::run::RunArgs),
    /// Run the break cycle against a simulated clock
    Simulate(commands::simulate::SimulateArgs),
    /// List configured presets
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RESPITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(config, args),
        Commands::Simulate(args) => commands::simulate::run(config, args),
        Commands::Presets { json } => commands::presets::run(config, json),
        Commands::Config { action } => commands::config::run(config, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
