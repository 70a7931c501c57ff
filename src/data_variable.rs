//! Data variable selection and reading
//!
//! The data variable is either named explicitly or chosen as the first
//! variable, in file order, that is laid out on the coordinate grid:
//!
//! - it is neither the latitude nor the longitude variable,
//! - it is not a dimension coordinate (a 1-D variable named after its own
//!   dimension, such as `time(time)`),
//! - its trailing dimensions are the grid dimensions. For rectilinear grids
//!   the swapped `(lon, lat)` order is accepted too and read transposed.
//!
//! Dimensions in front of the grid (time, level, ...) are pinned to a single
//! index and only that slice is read. Values are masked against
//! `_FillValue`/`missing_value` and unpacked with `scale_factor`/`add_offset`.

use crate::coordinates::GridLayout;
use crate::errors::{Nc2JsonError, Result};
use crate::metadata::{numeric_attribute, string_attribute, variable_dimensions, DimensionInfo};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, NcVariableType};
use netcdf::{Extent, File};
use serde::Serialize;
use tracing::{debug, warn};

/// Units reported when a variable has no `units` attribute
pub const UNKNOWN_UNITS: &str = "unknown";

/// The `data_variable` block of the output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataVariable {
    pub name: String,
    pub units: String,
    pub long_name: String,
}

/// How a variable's trailing dimensions line up with the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOrientation {
    /// Trailing dimensions equal the grid dimensions
    Aligned,
    /// Trailing dimensions are `(lon, lat)` on a rectilinear grid
    Transposed,
}

/// Name and dimensions of a variable, as seen by the selection rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableLayout {
    pub name: String,
    pub dims: Vec<DimensionInfo>,
}

impl VariableLayout {
    pub fn new(name: impl Into<String>, dims: Vec<DimensionInfo>) -> Self {
        Self {
            name: name.into(),
            dims,
        }
    }

    /// A 1-D variable named after its own dimension
    pub fn is_dimension_coordinate(&self) -> bool {
        matches!(self.dims.as_slice(), [dim] if dim.name == self.name)
    }

    /// Orientation of this variable on `layout`, or `None` if it is not on the grid
    pub fn orientation(&self, layout: &GridLayout) -> Option<GridOrientation> {
        let grid = layout.grid_dims();
        if self.dims.len() < grid.len() {
            return None;
        }

        let trailing: Vec<&str> = self.dims[self.dims.len() - grid.len()..]
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        if trailing == grid {
            return Some(GridOrientation::Aligned);
        }

        match layout {
            GridLayout::Rectilinear {
                lat_dim, lon_dim, ..
            } if trailing == [lon_dim.as_str(), lat_dim.as_str()] => {
                Some(GridOrientation::Transposed)
            }
            _ => None,
        }
    }

    /// Dimensions in front of the grid dimensions
    pub fn leading_dims(&self, layout: &GridLayout) -> &[DimensionInfo] {
        let grid_rank = layout.grid_dims().len();
        &self.dims[..self.dims.len().saturating_sub(grid_rank)]
    }
}

/// Outcome of data variable selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSelection {
    pub variable: VariableLayout,
    pub orientation: GridOrientation,
}

/// Picks the data variable among `variables` (file order).
///
/// `coordinates` are the latitude and longitude variable names. An explicit
/// name must exist and lie on the grid.
pub fn select_data_variable(
    variables: &[VariableLayout],
    coordinates: [&str; 2],
    layout: &GridLayout,
    explicit: Option<&str>,
) -> Result<DataSelection> {
    if let Some(name) = explicit {
        let variable = variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| Nc2JsonError::resolution(format!("data variable '{}' not found", name)))?;

        let orientation = variable.orientation(layout).ok_or_else(|| {
            Nc2JsonError::resolution(format!(
                "data variable '{}' is not laid out on the grid ({})",
                name,
                layout.grid_dims().join(", ")
            ))
        })?;

        return Ok(DataSelection {
            variable: variable.clone(),
            orientation,
        });
    }

    variables
        .iter()
        .filter(|v| !coordinates.contains(&v.name.as_str()))
        .filter(|v| !v.is_dimension_coordinate())
        .find_map(|v| {
            v.orientation(layout).map(|orientation| DataSelection {
                variable: v.clone(),
                orientation,
            })
        })
        .ok_or_else(|| {
            Nc2JsonError::resolution(format!(
                "no data variable laid out on the grid ({})",
                layout.grid_dims().join(", ")
            ))
        })
}

/// Missing-value and packing attributes of a variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueDecoder {
    pub fill_values: Vec<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl ValueDecoder {
    /// Collects `_FillValue`, `missing_value`, `scale_factor` and `add_offset`.
    ///
    /// Sentinels of a `float` variable are rounded to single precision so a
    /// `double` `missing_value` still matches the stored values.
    pub fn from_variable(var: &netcdf::Variable) -> Self {
        let mut fill_values = Vec::new();
        for name in ["_FillValue", "missing_value"] {
            if let Some(values) = numeric_attribute(var, name) {
                fill_values.extend(values);
            }
        }

        let decoder = Self {
            fill_values,
            scale_factor: numeric_attribute(var, "scale_factor").and_then(|v| v.first().copied()),
            add_offset: numeric_attribute(var, "add_offset").and_then(|v| v.first().copied()),
        };

        match var.vartype() {
            NcVariableType::Float(FloatType::F32) => decoder.narrowed_to_f32(),
            _ => decoder,
        }
    }

    /// Rounds every fill value to the nearest `f32`
    pub fn narrowed_to_f32(mut self) -> Self {
        for fill in &mut self.fill_values {
            *fill = *fill as f32 as f64;
        }
        self
    }

    /// Reads a whole variable and decodes it, with missing values as NaN
    pub fn read_decoded(var: &netcdf::Variable) -> Result<Vec<f64>> {
        let decoder = Self::from_variable(var);
        let raw: Vec<f64> = var.get_values::<f64, _>(..)?;
        Ok(raw
            .into_iter()
            .map(|v| decoder.decode(v).unwrap_or(f64::NAN))
            .collect())
    }

    /// Decodes one raw value; `None` marks it missing.
    ///
    /// Fill values are compared against the raw (packed) value. Non-finite
    /// results are treated as missing.
    pub fn decode(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() || self.fill_values.iter().any(|&fill| fill == raw) {
            return None;
        }

        let value = raw * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0);
        value.is_finite().then_some(value)
    }
}

/// A data variable read onto the coordinate grid
#[derive(Debug, Clone)]
pub struct GridData {
    pub variable: DataVariable,
    /// Decoded values in grid row-major order
    pub values: Vec<Option<f64>>,
}

/// Selects and reads the data variable of `file` for the given grid.
pub fn read_data_variable(
    file: &File,
    coordinates: [&str; 2],
    layout: &GridLayout,
    explicit: Option<&str>,
    leading_index: usize,
) -> Result<GridData> {
    let variables: Vec<VariableLayout> = file
        .variables()
        .map(|v| VariableLayout::new(v.name().to_string(), variable_dimensions(&v)))
        .collect();

    let selection = select_data_variable(&variables, coordinates, layout, explicit)?;
    let name = selection.variable.name.as_str();

    let var = file
        .variable(name)
        .ok_or_else(|| Nc2JsonError::resolution(format!("data variable '{}' not found", name)))?;

    let leading = selection.variable.leading_dims(layout);
    for dim in leading {
        if leading_index >= dim.length {
            return Err(Nc2JsonError::invalid_data(format!(
                "leading index {} out of range for dimension '{}' of length {}",
                leading_index, dim.name, dim.length
            )));
        }
    }
    if !leading.is_empty() {
        let pinned: Vec<&str> = leading.iter().map(|d| d.name.as_str()).collect();
        debug!(variable = name, leading_index, dims = ?pinned, "pinning leading dimensions");
    }

    let extents = slice_extents(&selection.variable.dims, leading.len(), leading_index);
    let raw: Vec<f64> = var.get_values::<f64, _>(extents.as_slice())?;
    let shape: Vec<usize> = selection.variable.dims[leading.len()..]
        .iter()
        .map(|d| d.length)
        .collect();
    let grid = ArrayD::from_shape_vec(IxDyn(&shape), raw)?;
    let grid = match selection.orientation {
        GridOrientation::Aligned => grid,
        GridOrientation::Transposed => grid.reversed_axes(),
    };

    let decoder = ValueDecoder::from_variable(&var);
    let values: Vec<Option<f64>> = grid.iter().map(|&raw| decoder.decode(raw)).collect();

    let missing = values.iter().filter(|v| v.is_none()).count();
    if !values.is_empty() && missing == values.len() {
        warn!(variable = name, "every value of the data variable is missing");
    }

    let variable = DataVariable {
        name: name.to_string(),
        units: string_attribute(&var, "units").unwrap_or_else(|| UNKNOWN_UNITS.to_string()),
        long_name: string_attribute(&var, "long_name").unwrap_or_else(|| name.to_string()),
    };

    Ok(GridData { variable, values })
}

/// Extents selecting `index` on the first `leading` dimensions and everything else in full
fn slice_extents(dims: &[DimensionInfo], leading: usize, index: usize) -> Vec<Extent> {
    dims.iter()
        .enumerate()
        .map(|(axis, dim)| {
            if axis < leading {
                Extent::from(index)
            } else {
                Extent::from(0..dim.length)
            }
        })
        .collect()
}
