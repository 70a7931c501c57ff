//! Defines command-line interface options using `clap` for the nc2json application.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for converting NetCDF grids into JSON point records
#[derive(Parser, Debug)]
#[command(
    version,
    name = "nc2json",
    about = "Convert every .nc file in a directory into _all/_filtered JSON point files"
)]
pub struct Args {
    /// Directory to scan for .nc files (not recursive)
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Directory for the JSON output. Defaults to the scanned directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Name of the data variable to export. Defaults to the first variable laid out on the lat/lon grid.
    #[arg(long)]
    pub variable: Option<String>,

    /// Index used for leading dimensions such as time or level
    #[arg(long, default_value_t = 0)]
    pub leading_index: usize,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
