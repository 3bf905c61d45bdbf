mod server;
mod web;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calculator::CalculatorModule;
use calculator_bootstrap::{AppConfig, CliArgs, cancel_on_shutdown, init_logging};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

/// Calculator Server - stateful calculator over HTTP
#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Calculator Server - stateful calculator with history, undo and reset")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let _log_guard = init_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    // Module sections are only validated when a module is built from them
    CalculatorModule::from_config(config).context("calculator module config is invalid")?;
    println!("Configuration is valid");
    print!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Calculator Server starting");

    let module = CalculatorModule::from_config(&config)
        .context("failed to initialize calculator module")?;
    let router = server::build_router(&config.server, &module);

    let cancel = CancellationToken::new();
    let _signal_task = cancel_on_shutdown(cancel.clone());

    server::serve(&config.server, router, cancel).await?;

    tracing::info!("Calculator Server stopped");
    Ok(())
}
