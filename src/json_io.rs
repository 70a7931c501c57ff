//! JSON output writing
//!
//! Documents are serialized into a temporary file next to their destination
//! and renamed into place, so a failed write never leaves a truncated JSON
//! file behind.

use crate::document::OutputVariant;
use crate::errors::{Nc2JsonError, Result};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// `{output_dir}/{stem}{suffix}.json`
pub fn output_path(output_dir: &Path, stem: &str, variant: OutputVariant) -> PathBuf {
    output_dir.join(format!("{}{}.json", stem, variant.suffix()))
}

/// Source file name without its extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Mode of written outputs; temporary files start out owner-only
#[cfg(unix)]
pub const OUTPUT_MODE: u32 = 0o644;

/// Writes `value` as pretty-printed UTF-8 JSON to `path`, atomically.
pub fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let serialization_error = |message: String| Nc2JsonError::Serialization {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| serialization_error(format!("cannot create temporary file: {}", e)))?;

    {
        let mut writer = BufWriter::new(&mut tmp);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| serialization_error(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| serialization_error(e.to_string()))?;
    }

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(Permissions::from_mode(OUTPUT_MODE))
            .map_err(|e| serialization_error(e.to_string()))?;
    }

    tmp.persist(path)
        .map_err(|e| serialization_error(e.error.to_string()))?;

    debug!(path = %path.display(), "wrote JSON output");
    Ok(())
}
