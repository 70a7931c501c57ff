//! Centralized error handling for nc2json
//!
//! Every failure inside the per-file pipeline is expressed as a
//! [`Nc2JsonError`]. The batch driver catches these at the file boundary,
//! logs them with the file name, and moves on to the next file.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nc2json operations
#[derive(Error, Debug)]
pub enum Nc2JsonError {
    /// The file could not be opened as NetCDF (unreadable or corrupt)
    #[error("Failed to open NetCDF file '{}': {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    /// NetCDF library errors raised while reading an already opened file
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// Latitude, longitude or data variable could not be identified
    #[error("Variable resolution error: {message}")]
    VariableResolution { message: String },

    /// Data does not line up with the coordinate grid
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON encoding or output write failure
    #[error("Failed to write '{}': {message}", path.display())]
    Serialization { path: PathBuf, message: String },

    /// I/O errors outside of output writing (directory scans, mkdir)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Array shape errors
    #[error("Array error: {0}")]
    Array(#[from] ndarray::ShapeError),
}

impl Nc2JsonError {
    pub(crate) fn resolution(message: impl Into<String>) -> Self {
        Nc2JsonError::VariableResolution {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        Nc2JsonError::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type alias for nc2json operations
pub type Result<T> = std::result::Result<T, Nc2JsonError>;
