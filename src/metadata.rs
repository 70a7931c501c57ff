//! NetCDF metadata extraction
//!
//! This module turns the self-describing parts of a NetCDF file (variable
//! names, dimensions and global attributes) into the `file_info` block of the
//! output document.

use netcdf::{AttributeValue, File};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use tracing::{debug, warn};

/// File-level description written into every output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub variables: Vec<String>,
    pub dimensions: Map<String, JsonValue>,
    pub global_attributes: Map<String, JsonValue>,
}

impl FileInfo {
    /// Length of a named dimension, if present
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .get(name)
            .and_then(JsonValue::as_u64)
            .map(|len| len as usize)
    }
}

/// Name and length of one dimension of a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub name: String,
    pub length: usize,
}

impl DimensionInfo {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Dimensions of a variable, outermost first
pub fn variable_dimensions(var: &netcdf::Variable) -> Vec<DimensionInfo> {
    var.dimensions()
        .iter()
        .map(|d| DimensionInfo::new(d.name().to_string(), d.len()))
        .collect()
}

/// Collects variable names, dimension sizes and global attributes, all in file order.
pub fn extract_file_info(file: &File, path: &Path) -> FileInfo {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let variables: Vec<String> = file.variables().map(|v| v.name().to_string()).collect();

    let mut dimensions = Map::new();
    for dim in file.dimensions() {
        dimensions.insert(dim.name().to_string(), JsonValue::from(dim.len()));
    }

    let mut global_attributes = Map::new();
    for attr in file.attributes() {
        let value = match attr.value() {
            Ok(value) => attribute_to_json(&value),
            Err(e) => {
                warn!(attribute = attr.name(), "could not read global attribute: {}", e);
                JsonValue::String(format!("<unreadable: {}>", e))
            }
        };
        global_attributes.insert(attr.name().to_string(), value);
    }

    debug!(
        file = %filename,
        variables = variables.len(),
        dimensions = dimensions.len(),
        attributes = global_attributes.len(),
        "extracted file metadata"
    );

    FileInfo {
        filename,
        variables,
        dimensions,
        global_attributes,
    }
}

/// Converts a NetCDF attribute into its JSON representation.
///
/// Non-finite floats become `null`.
pub fn attribute_to_json(value: &AttributeValue) -> JsonValue {
    match value {
        AttributeValue::Str(s) => JsonValue::from(s.as_str()),
        AttributeValue::Strs(ss) => JsonValue::from(ss.clone()),
        AttributeValue::Float(f) => JsonValue::from(*f),
        AttributeValue::Floats(fs) => JsonValue::from(fs.clone()),
        AttributeValue::Double(d) => JsonValue::from(*d),
        AttributeValue::Doubles(ds) => JsonValue::from(ds.clone()),
        AttributeValue::Schar(i) => JsonValue::from(*i),
        AttributeValue::Schars(is) => JsonValue::from(is.clone()),
        AttributeValue::Uchar(u) => JsonValue::from(*u),
        AttributeValue::Uchars(us) => JsonValue::from(us.clone()),
        AttributeValue::Short(s) => JsonValue::from(*s),
        AttributeValue::Shorts(ss) => JsonValue::from(ss.clone()),
        AttributeValue::Ushort(u) => JsonValue::from(*u),
        AttributeValue::Ushorts(us) => JsonValue::from(us.clone()),
        AttributeValue::Int(i) => JsonValue::from(*i),
        AttributeValue::Ints(is) => JsonValue::from(is.clone()),
        AttributeValue::Uint(u) => JsonValue::from(*u),
        AttributeValue::Uints(us) => JsonValue::from(us.clone()),
        AttributeValue::Longlong(i) => JsonValue::from(*i),
        AttributeValue::Longlongs(is) => JsonValue::from(is.clone()),
        AttributeValue::Ulonglong(u) => JsonValue::from(*u),
        AttributeValue::Ulonglongs(us) => JsonValue::from(us.clone()),
        #[allow(unreachable_patterns)]
        other => JsonValue::String(format!("{:?}", other)),
    }
}

/// Numeric view of an attribute, used for fill values and packing parameters.
///
/// Scalars yield one element, lists yield all of theirs, strings yield none.
pub fn attribute_as_f64s(value: &AttributeValue) -> Vec<f64> {
    match value {
        AttributeValue::Float(f) => vec![*f as f64],
        AttributeValue::Floats(fs) => fs.iter().map(|&f| f as f64).collect(),
        AttributeValue::Double(d) => vec![*d],
        AttributeValue::Doubles(ds) => ds.clone(),
        AttributeValue::Schar(i) => vec![*i as f64],
        AttributeValue::Schars(is) => is.iter().map(|&i| i as f64).collect(),
        AttributeValue::Uchar(u) => vec![*u as f64],
        AttributeValue::Uchars(us) => us.iter().map(|&u| u as f64).collect(),
        AttributeValue::Short(s) => vec![*s as f64],
        AttributeValue::Shorts(ss) => ss.iter().map(|&s| s as f64).collect(),
        AttributeValue::Ushort(u) => vec![*u as f64],
        AttributeValue::Ushorts(us) => us.iter().map(|&u| u as f64).collect(),
        AttributeValue::Int(i) => vec![*i as f64],
        AttributeValue::Ints(is) => is.iter().map(|&i| i as f64).collect(),
        AttributeValue::Uint(u) => vec![*u as f64],
        AttributeValue::Uints(us) => us.iter().map(|&u| u as f64).collect(),
        AttributeValue::Longlong(i) => vec![*i as f64],
        AttributeValue::Longlongs(is) => is.iter().map(|&i| i as f64).collect(),
        AttributeValue::Ulonglong(u) => vec![*u as f64],
        AttributeValue::Ulonglongs(us) => us.iter().map(|&u| u as f64).collect(),
        _ => Vec::new(),
    }
}

/// Reads a string attribute of a variable
pub fn string_attribute(var: &netcdf::Variable, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(ss) => Some(ss.join(" ")),
        _ => None,
    }
}

/// Reads a numeric attribute of a variable as a list of f64
pub fn numeric_attribute(var: &netcdf::Variable, name: &str) -> Option<Vec<f64>> {
    let value = var.attribute(name)?.value().ok()?;
    let numbers = attribute_as_f64s(&value);
    if numbers.is_empty() {
        None
    } else {
        Some(numbers)
    }
}
