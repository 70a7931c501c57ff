//! Run configuration for the converter
//!
//! The converter never looks at the process working directory on its own;
//! the directory to scan is always carried by a [`ConverterConfig`].

use crate::cli::Args;
use std::path::{Path, PathBuf};

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub input_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub variable: Option<String>,
    pub leading_index: usize,
}

impl ConverterConfig {
    /// Create a configuration that scans `input_dir` and writes next to the inputs
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            variable: None,
            leading_index: 0,
        }
    }

    /// Write JSON output into a separate directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    /// Export a specific data variable instead of the default selection
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Index to use for dimensions preceding the lat/lon grid
    pub fn with_leading_index(mut self, leading_index: usize) -> Self {
        self.leading_index = leading_index;
        self
    }

    /// Effective output directory
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(self.input_dir.as_path())
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl From<&Args> for ConverterConfig {
    fn from(args: &Args) -> Self {
        Self {
            input_dir: args.dir.clone(),
            output_dir: args.output_dir.clone(),
            variable: args.variable.clone(),
            leading_index: args.leading_index,
        }
    }
}
