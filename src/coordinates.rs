//! Latitude/longitude resolution
//!
//! Coordinates are found by exact, case-sensitive lookup against two ordered
//! candidate tables. The first candidate present in the file wins. The shapes
//! of the two variables then decide how they pair up into grid points, see
//! [`GridLayout`]. Coordinate values are masked and unpacked like data
//! values, with masked cells kept as NaN.

use crate::data_variable::ValueDecoder;
use crate::errors::{Nc2JsonError, Result};
use crate::metadata::{variable_dimensions, DimensionInfo};
use netcdf::File;
use serde::Serialize;
use tracing::debug;

/// Latitude variable names, in priority order
pub const LATITUDE_CANDIDATES: [&str; 6] = ["lat", "latitude", "y", "Y", "LAT", "LATITUDE"];

/// Longitude variable names, in priority order
pub const LONGITUDE_CANDIDATES: [&str; 6] = ["lon", "longitude", "x", "X", "LON", "LONGITUDE"];

/// Returns the first candidate that is one of `names`.
pub fn find_candidate<'c, S: AsRef<str>>(names: &[S], candidates: &[&'c str]) -> Option<&'c str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| names.iter().any(|name| name.as_ref() == *candidate))
}

/// How the latitude and longitude arrays combine into points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLayout {
    /// 1-D latitude and 1-D longitude on different dimensions; points are their outer product
    Rectilinear {
        lat_dim: String,
        lon_dim: String,
        n_lat: usize,
        n_lon: usize,
    },
    /// 1-D latitude and longitude sharing one dimension; one point per index
    Paired { dim: String, len: usize },
    /// 2-D latitude and longitude over the same two dimensions; one point per cell
    Curvilinear { dims: [String; 2], shape: [usize; 2] },
}

impl GridLayout {
    /// Derives the layout from the dimensions of the latitude and longitude variables.
    pub fn from_dimensions(lat: &[DimensionInfo], lon: &[DimensionInfo]) -> Result<Self> {
        match (lat, lon) {
            ([lat_d], [lon_d]) if lat_d.name == lon_d.name => Ok(GridLayout::Paired {
                dim: lat_d.name.clone(),
                len: lat_d.length,
            }),
            ([lat_d], [lon_d]) => Ok(GridLayout::Rectilinear {
                lat_dim: lat_d.name.clone(),
                lon_dim: lon_d.name.clone(),
                n_lat: lat_d.length,
                n_lon: lon_d.length,
            }),
            ([lat_r, lat_c], [lon_r, lon_c]) => {
                if lat_r.name != lon_r.name || lat_c.name != lon_c.name {
                    return Err(Nc2JsonError::resolution(format!(
                        "2-D latitude ({}, {}) and longitude ({}, {}) must share dimensions",
                        lat_r.name, lat_c.name, lon_r.name, lon_c.name
                    )));
                }
                Ok(GridLayout::Curvilinear {
                    dims: [lat_r.name.clone(), lat_c.name.clone()],
                    shape: [lat_r.length, lat_c.length],
                })
            }
            _ => Err(Nc2JsonError::resolution(format!(
                "unsupported coordinate ranks: latitude is {}-D, longitude is {}-D",
                lat.len(),
                lon.len()
            ))),
        }
    }

    /// Dimension names the data variable must end with, outermost first
    pub fn grid_dims(&self) -> Vec<&str> {
        match self {
            GridLayout::Rectilinear {
                lat_dim, lon_dim, ..
            } => vec![lat_dim.as_str(), lon_dim.as_str()],
            GridLayout::Paired { dim, .. } => vec![dim.as_str()],
            GridLayout::Curvilinear { dims, .. } => vec![dims[0].as_str(), dims[1].as_str()],
        }
    }

    /// Shape of the value grid, matching [`GridLayout::grid_dims`]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            GridLayout::Rectilinear { n_lat, n_lon, .. } => vec![*n_lat, *n_lon],
            GridLayout::Paired { len, .. } => vec![*len],
            GridLayout::Curvilinear { shape, .. } => shape.to_vec(),
        }
    }

    /// Number of points the grid flattens into
    pub fn point_count(&self) -> usize {
        self.shape().iter().product()
    }
}

/// The `coordinate_system` block of the output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSystem {
    pub latitude_variable: String,
    pub longitude_variable: String,
    pub latitude_range: [f64; 2],
    pub longitude_range: [f64; 2],
}

/// Coordinates read from a file, ready for flattening
#[derive(Debug, Clone)]
pub struct ResolvedCoordinates {
    pub system: CoordinateSystem,
    pub layout: GridLayout,
    /// Latitude values in row-major order
    pub latitudes: Vec<f64>,
    /// Longitude values in row-major order
    pub longitudes: Vec<f64>,
}

/// Finds the latitude/longitude variables of `file` and reads their values.
pub fn resolve_coordinates(file: &File) -> Result<ResolvedCoordinates> {
    let names: Vec<String> = file.variables().map(|v| v.name().to_string()).collect();

    let lat_name = find_candidate(&names, &LATITUDE_CANDIDATES).ok_or_else(|| {
        Nc2JsonError::resolution(format!(
            "no latitude variable found (looked for {})",
            LATITUDE_CANDIDATES.join(", ")
        ))
    })?;
    let lon_name = find_candidate(&names, &LONGITUDE_CANDIDATES).ok_or_else(|| {
        Nc2JsonError::resolution(format!(
            "no longitude variable found (looked for {})",
            LONGITUDE_CANDIDATES.join(", ")
        ))
    })?;

    let lat_var = file
        .variable(lat_name)
        .ok_or_else(|| Nc2JsonError::resolution(format!("variable '{}' vanished", lat_name)))?;
    let lon_var = file
        .variable(lon_name)
        .ok_or_else(|| Nc2JsonError::resolution(format!("variable '{}' vanished", lon_name)))?;

    let layout =
        GridLayout::from_dimensions(&variable_dimensions(&lat_var), &variable_dimensions(&lon_var))?;

    // Masked coordinates become NaN so the ranges skip them
    let latitudes = ValueDecoder::read_decoded(&lat_var)?;
    let longitudes = ValueDecoder::read_decoded(&lon_var)?;

    debug!(
        latitude = lat_name,
        longitude = lon_name,
        layout = ?layout,
        "resolved coordinate variables"
    );

    Ok(ResolvedCoordinates {
        system: CoordinateSystem {
            latitude_variable: lat_name.to_string(),
            longitude_variable: lon_name.to_string(),
            latitude_range: value_range(&latitudes),
            longitude_range: value_range(&longitudes),
        },
        layout,
        latitudes,
        longitudes,
    })
}

/// `[min, max]` of the non-NaN values; `[NaN, NaN]` (serialized as nulls) when there are none.
pub fn value_range(values: &[f64]) -> [f64; 2] {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold([f64::NAN, f64::NAN], |[min, max], v| [min.min(v), max.max(v)])
}
