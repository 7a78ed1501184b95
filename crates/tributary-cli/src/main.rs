//! Tributary CLI - Extract and rank musical influences from evidence text.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tributary_cli::commands;
use tributary_cli::{Cli, Command, EngineConfig, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> tributary_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Variants(args) => commands::execute_variants(args, &config, &formatter)?,
        Command::Plan(args) => commands::execute_plan(args, &config, &formatter)?,
    }

    Ok(())
}
