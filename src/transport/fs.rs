use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::FeatureError;

/// Read every non-blank line of `path` as one JSON object.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeatureError> {
    let file = File::open(path).map_err(|err| FeatureError::MalformedRecord {
        path: path.to_path_buf(),
        line: 0,
        reason: format!("cannot open: {err}"),
    })?;
    parse_json_lines(BufReader::new(file), path)
}

/// Parse JSON lines from `reader`; `path` is used only for error context.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_json_lines<T, R>(reader: R, path: &Path) -> Result<Vec<T>, FeatureError>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| FeatureError::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: err.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|err| FeatureError::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write `path` through a sibling temp file that is persisted only on success.
///
/// A failed `write` leaves any previous file at `path` untouched.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), FeatureError>
where
    F: FnOnce(&mut File) -> Result<(), FeatureError>,
{
    let output_err = |reason: String| FeatureError::Output {
        path: path.to_path_buf(),
        reason,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| output_err(err.to_string()))?;
    let mut temp = NamedTempFile::new_in(parent).map_err(|err| output_err(err.to_string()))?;
    write(temp.as_file_mut())?;
    temp.as_file_mut()
        .flush()
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|err| output_err(err.to_string()))?;
    temp.persist(path)
        .map_err(|err| output_err(err.error.to_string()))?;
    Ok(())
}
