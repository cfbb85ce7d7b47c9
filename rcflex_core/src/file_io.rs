//! # File I/O Module
//!
//! Reads section inputs and writes analysis results as JSON.
//!
//! - **Validated loads**: a parsed input is checked before it is returned
//! - **Atomic saves**: write to `.tmp`, sync, rename to prevent corruption
//! - **Version validation**: inputs carry a schema version
//!
//! ## Example
//!
//! ```rust,no_run
//! use rcflex_core::calculations::flexure::calculate;
//! use rcflex_core::file_io::{load_input, save_result};
//! use std::path::Path;
//!
//! let input = load_input(Path::new("beam.json")).unwrap();
//! let result = calculate(&input).unwrap();
//! save_result(&result, Path::new("beam.result.json")).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::calculations::flexure::{FlexureInput, FlexureResult, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};

/// Load and validate a section input file.
pub fn load_input(path: &Path) -> CalcResult<FlexureInput> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let input: FlexureInput =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&input.schema_version)?;
    input.validate()?;

    Ok(input)
}

/// Save an analysis result with an atomic write.
pub fn save_result(result: &FlexureResult, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(result).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version may contain breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}
