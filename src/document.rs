//! Output document model
//!
//! One [`OutputDocument`] is produced per input file and written in two
//! variants that differ only in which points they carry.

use crate::coordinates::CoordinateSystem;
use crate::data_variable::DataVariable;
use crate::flatten::DataPoint;
use crate::metadata::FileInfo;
use serde::Serialize;

/// The JSON object written for one converted file
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument<'a> {
    pub file_info: &'a FileInfo,
    pub coordinate_system: &'a CoordinateSystem,
    pub data_variable: &'a DataVariable,
    pub data_points: &'a [DataPoint],
}

/// Which points an output file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputVariant {
    /// Every grid point, missing values as `null`
    All,
    /// Only points with a value
    Filtered,
}

impl OutputVariant {
    pub const BOTH: [OutputVariant; 2] = [OutputVariant::All, OutputVariant::Filtered];

    /// File name suffix, without extension
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputVariant::All => "_all",
            OutputVariant::Filtered => "_filtered",
        }
    }
}
