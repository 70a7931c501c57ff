//! Flattening of coordinate grids into point records

use crate::coordinates::GridLayout;
use crate::errors::{Nc2JsonError, Result};
use serde::Serialize;

/// One grid cell. `value` is `None` where the source value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// Builds one record per grid cell in row-major order.
///
/// `values` must hold the data grid in the same row-major order as
/// [`GridLayout::shape`]; missing cells are `None`.
pub fn flatten_grid(
    layout: &GridLayout,
    latitudes: &[f64],
    longitudes: &[f64],
    values: &[Option<f64>],
) -> Result<Vec<DataPoint>> {
    let expected = layout.point_count();
    if values.len() != expected {
        return Err(Nc2JsonError::invalid_data(format!(
            "data grid has {} values but the coordinate grid has {} points",
            values.len(),
            expected
        )));
    }

    let points = match layout {
        GridLayout::Rectilinear { n_lat, n_lon, .. } => {
            check_len("latitude", latitudes, *n_lat)?;
            check_len("longitude", longitudes, *n_lon)?;

            let mut points = Vec::with_capacity(expected);
            for (i, &latitude) in latitudes.iter().enumerate() {
                for (j, &longitude) in longitudes.iter().enumerate() {
                    points.push(DataPoint {
                        latitude,
                        longitude,
                        value: values[i * n_lon + j],
                    });
                }
            }
            points
        }
        GridLayout::Paired { .. } | GridLayout::Curvilinear { .. } => {
            check_len("latitude", latitudes, expected)?;
            check_len("longitude", longitudes, expected)?;

            latitudes
                .iter()
                .zip(longitudes)
                .zip(values)
                .map(|((&latitude, &longitude), &value)| DataPoint {
                    latitude,
                    longitude,
                    value,
                })
                .collect()
        }
    };

    Ok(points)
}

/// Keeps only the points that carry a value, preserving order
pub fn filter_missing(points: &[DataPoint]) -> Vec<DataPoint> {
    points.iter().filter(|p| !p.is_missing()).copied().collect()
}

fn check_len(what: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(Nc2JsonError::invalid_data(format!(
            "{} has {} values, expected {}",
            what,
            values.len(),
            expected
        )));
    }
    Ok(())
}
