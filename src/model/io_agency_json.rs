//! JSON writer for per-agency documents.
//!
//! Each agency is written to its own file named after the identifier
//! (`<ori7>.json`). The same helpers write any other serializable summary
//! the pipeline produces, such as the median table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::document::AgencyDocument;
use crate::error::ClearanceError;

/// Checks that `stem` names a file directly inside the output directory:
/// non-empty, without a path separator and without `..`.
pub fn ensure_plain_file_stem(stem: &str) -> Result<(), ClearanceError> {
    let plain = !stem.is_empty()
        && !stem.contains(['/', '\\', '\0'])
        && !stem.contains("..");
    if plain {
        Ok(())
    } else {
        Err(ClearanceError::UnsafeFileName {
            name: stem.to_string(),
        })
    }
}

/// File name used for an agency's document.
pub fn agency_json_file_name(doc: &AgencyDocument) -> Result<String, ClearanceError> {
    ensure_plain_file_stem(doc.ori7.as_str())?;
    Ok(format!("{}.json", doc.ori7))
}

/// Writes one agency document into `dir`, returning the path written.
///
/// # Errors
/// `UnsafeFileName` if the identifier is not usable as a file name.
pub fn write_agency_json(dir: &Path, doc: &AgencyDocument) -> Result<PathBuf, ClearanceError> {
    let path = dir.join(agency_json_file_name(doc)?);
    write_json(&path, doc)?;
    Ok(path)
}

/// Writes any serializable value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ClearanceError> {
    let file = File::create(path).map_err(ClearanceError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        ClearanceError::JsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    writer.flush().map_err(ClearanceError::Io)
}

/// Writes an agency document to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_agency_json_string(doc: &AgencyDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}
