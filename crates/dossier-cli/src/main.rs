//! Dossier CLI - main entry point.

use clap::Parser;
use dossier_cli::commands;
use dossier_cli::{Cli, Command, Config, Console};

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let console = Console::new(!cli.no_color);

    if let Err(e) = run(cli, &console).await {
        if !e.is_reported() {
            console.error(&e.to_string());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, console: &Console) -> dossier_cli::Result<()> {
    let config = Config::from_env();

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, console).await,
        Command::Claim(args) => commands::execute_claim(args, &config, console),
        Command::Validate(args) => commands::execute_validate(args, console),
    }
}
