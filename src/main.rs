//! Entry point for the nc2json application.
//! Handles CLI parsing and logging setup, then converts every NetCDF file in the target directory.

use clap::Parser;
use nc2json::cli::Args;
use nc2json::config::ConverterConfig;
use nc2json::converter::run_batch;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ConverterConfig::from(&args);
    let summary = run_batch(&config)?;

    if summary.files_found > 0 {
        summary.print();
    }

    Ok(())
}
