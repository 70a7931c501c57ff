//! Per-file conversion pipeline and batch driver
//!
//! Each file goes through: open → metadata → coordinates → data variable →
//! flatten → write `_all` and `_filtered`. Files are processed one after the
//! other and every per-file error is contained at the file boundary.

use crate::config::ConverterConfig;
use crate::coordinates::{resolve_coordinates, CoordinateSystem};
use crate::data_variable::{read_data_variable, DataVariable};
use crate::discovery::discover_netcdf_files;
use crate::document::{OutputDocument, OutputVariant};
use crate::errors::{Nc2JsonError, Result};
use crate::flatten::{filter_missing, flatten_grid, DataPoint};
use crate::json_io::{file_stem, output_path, write_json_atomic};
use crate::metadata::{extract_file_info, FileInfo};
use crate::statistics::{BatchSummary, ConversionStats};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Everything extracted from one NetCDF file
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub stem: String,
    pub file_info: FileInfo,
    pub coordinate_system: CoordinateSystem,
    pub data_variable: DataVariable,
    pub all_points: Vec<DataPoint>,
    pub filtered_points: Vec<DataPoint>,
}

impl ConvertedFile {
    /// The document for one output variant
    pub fn document(&self, variant: OutputVariant) -> OutputDocument<'_> {
        let data_points = match variant {
            OutputVariant::All => &self.all_points,
            OutputVariant::Filtered => &self.filtered_points,
        };

        OutputDocument {
            file_info: &self.file_info,
            coordinate_system: &self.coordinate_system,
            data_variable: &self.data_variable,
            data_points,
        }
    }

    pub fn stats(&self) -> ConversionStats {
        ConversionStats::from_points(&self.all_points)
    }
}

/// Reads one NetCDF file into point records. The file is closed on return.
pub fn convert_file(path: &Path, config: &ConverterConfig) -> Result<ConvertedFile> {
    let file = netcdf::open(path).map_err(|source| Nc2JsonError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let file_info = extract_file_info(&file, path);
    let coordinates = resolve_coordinates(&file)?;

    let coordinate_names = [
        coordinates.system.latitude_variable.as_str(),
        coordinates.system.longitude_variable.as_str(),
    ];
    let data = read_data_variable(
        &file,
        coordinate_names,
        &coordinates.layout,
        config.variable.as_deref(),
        config.leading_index,
    )?;

    let all_points = flatten_grid(
        &coordinates.layout,
        &coordinates.latitudes,
        &coordinates.longitudes,
        &data.values,
    )?;
    let filtered_points = filter_missing(&all_points);

    Ok(ConvertedFile {
        stem: file_stem(path),
        file_info,
        coordinate_system: coordinates.system,
        data_variable: data.variable,
        all_points,
        filtered_points,
    })
}

/// Writes the `_all` and `_filtered` documents, returning their paths in that order.
///
/// Each file holds a one-element JSON array. When a write fails, variants
/// already written are removed again.
pub fn write_outputs(converted: &ConvertedFile, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(OutputVariant::BOTH.len());

    for variant in OutputVariant::BOTH {
        let path = output_path(output_dir, &converted.stem, variant);
        if let Err(e) = write_json_atomic(&[converted.document(variant)], &path) {
            for done in &written {
                if let Err(remove_err) = fs::remove_file(done) {
                    warn!(path = %done.display(), "cannot remove partial output: {}", remove_err);
                }
            }
            return Err(e);
        }
        written.push(path);
    }

    Ok(written)
}

/// Converts and writes one file
pub fn process_file(path: &Path, config: &ConverterConfig) -> Result<ConvertedFile> {
    let converted = convert_file(path, config)?;
    let written = write_outputs(&converted, config.output_dir())?;

    for out in &written {
        println!("✅ Saved {}", out.display());
    }

    Ok(converted)
}

/// Converts every `.nc` file in the configured directory.
///
/// Only setup failures (unreadable input directory, output directory
/// creation) are returned as errors; per-file failures are logged and
/// recorded in the summary.
pub fn run_batch(config: &ConverterConfig) -> Result<BatchSummary> {
    let files = discover_netcdf_files(&config.input_dir)?;
    let mut summary = BatchSummary {
        files_found: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        println!("No .nc files found in {}", config.input_dir.display());
        return Ok(summary);
    }

    fs::create_dir_all(config.output_dir())?;

    println!("Found {} NetCDF file(s):", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }

    for path in &files {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        println!("\n⚡ Converting {}", filename);
        info!(file = %filename, "converting");

        match process_file(path, config) {
            Ok(converted) => {
                let stats = converted.stats();
                stats.print(&filename);
                summary.record_success(&filename, &stats, &converted.filtered_points);
            }
            Err(e) => {
                error!(file = %filename, "skipping file: {}", e);
                summary.record_failure(&filename, e.to_string());
            }
        }
    }

    if summary.converted == 0 {
        warn!("no file was converted successfully");
    }

    Ok(summary)
}
