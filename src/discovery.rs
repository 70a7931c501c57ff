//! Discovery of NetCDF inputs in a directory

use crate::errors::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension recognised as NetCDF input
pub const NETCDF_EXTENSION: &str = "nc";

/// Lists the `.nc` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched. An empty result is not an error.
pub fn discover_netcdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if !path.is_file() {
            continue;
        }

        if is_netcdf_path(&path) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-NetCDF entry");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// True when the path's extension is exactly `nc`
pub fn is_netcdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == NETCDF_EXTENSION)
        .unwrap_or(false)
}
