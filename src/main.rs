use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use apilog::{Input, RunOptions};
use apilog_core::config::Config;

#[derive(Parser)]
#[command(name = "apilog", about = "Extract API call records from JSON log exports into CSV")]
struct Cli {
    /// Line-delimited JSON export to read, or `-` for stdin.
    input: String,

    /// CSV file to write. Defaults to a timestamped name in the configured
    /// output directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extra config file layered over the defaults and ~/.config/apilog/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the marker that introduces the key=value section.
    #[arg(long)]
    marker: Option<String>,

    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "info" })
            }),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(marker) = cli.marker {
        config.extract.marker = marker;
    }

    let opts = RunOptions {
        input: Input::from(cli.input.as_str()),
        output: cli.output,
        config,
    };
    apilog::run(&opts)?;
    Ok(())
}
