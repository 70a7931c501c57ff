//! nc2json: NetCDF grid to JSON point conversion
//!
//! nc2json scans a directory for NetCDF (`.nc`) files and turns each one into
//! two JSON documents: `{stem}_all.json` with one record per latitude/longitude
//! grid point (missing values as `null`), and `{stem}_filtered.json` with the
//! missing records removed.
//!
//! ## Module Organization
//!
//! - [`discovery`]: finding `.nc` files in a directory
//! - [`metadata`]: file-level metadata and attribute conversion
//! - [`coordinates`]: latitude/longitude resolution and grid layouts
//! - [`data_variable`]: data variable selection, masking and unpacking
//! - [`flatten`]: grid flattening into [`flatten::DataPoint`] records
//! - [`document`] and [`json_io`]: the output model and atomic JSON writing
//! - [`statistics`]: console statistics
//! - [`converter`]: the per-file pipeline and batch driver
//! - [`config`], [`cli`] and [`errors`]: configuration, arguments and errors
//!
//! ## Usage
//! ```rust,no_run
//! use nc2json::prelude::*;
//!
//! let config = ConverterConfig::new("data").with_output_dir("json");
//! let summary = run_batch(&config).unwrap();
//! summary.print();
//! ```

pub mod cli;
pub mod config;
pub mod converter;
pub mod coordinates;
pub mod data_variable;
pub mod discovery;
pub mod document;
pub mod errors;
pub mod flatten;
pub mod json_io;
pub mod metadata;
pub mod statistics;

pub use errors::{Nc2JsonError, Result};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::config::ConverterConfig;
    pub use crate::converter::{convert_file, process_file, run_batch, ConvertedFile};
    pub use crate::coordinates::{CoordinateSystem, GridLayout};
    pub use crate::document::{OutputDocument, OutputVariant};
    pub use crate::errors::{Nc2JsonError, Result};
    pub use crate::flatten::DataPoint;
    pub use crate::statistics::{BatchSummary, ConversionStats};
}
