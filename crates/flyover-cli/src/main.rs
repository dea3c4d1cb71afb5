mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, Overrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "flyover",
    about = "Upcoming ISS passes over your current location",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (missing file = defaults)
    #[arg(long, global = true, env = "FLYOVER_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log stage transitions and HTTP responses
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up your location and print the next ISS passes (default)
    Passes,

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // --verbose only opens up the pipeline's own logs, not hyper/reqwest.
    let default_filter = if cli.verbose {
        "warn,flyover_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = cmd::load_config(cli.config.as_deref(), &cli.overrides).and_then(|config| {
        match cli.command.unwrap_or(Commands::Passes) {
            Commands::Passes => cmd::passes::run(&config, cli.json),
            Commands::Config { subcommand } => cmd::config::run(&config, subcommand, cli.json),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
