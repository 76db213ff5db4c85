use anyhow::Context;
use atlas_config::AtlasConfig;
use clap::Parser;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("atlas-publish error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match &cli.command {
        cli::Commands::Key(args) => commands::key::handle(args, cli.pretty),
        cli::Commands::Publish(args) => {
            let config = load_config(&cli)?;
            commands::publish::handle(args, config, cli.pretty).await
        }
    }
}

fn load_config(cli: &cli::Cli) -> anyhow::Result<AtlasConfig> {
    match &cli.config {
        Some(path) => AtlasConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => AtlasConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ATLAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
