//! Feature file serialization.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::output::{DELIMITER, NOT_AVAILABLE};
use crate::errors::FeatureError;
use crate::features::{FEATURE_HEADER, FeatureVector};

/// One output value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    /// Counts, ages, codes, and 0/1 indicators.
    Int(i64),
    /// Written in shortest round-trip form; non-finite values become NA.
    Float(f64),
    /// Identifier strings.
    Id(&'a str),
    /// Explicit not-available marker.
    NotAvailable,
}

impl Cell<'_> {
    /// `Float` for `Some`, `NotAvailable` for `None`.
    pub fn float(value: Option<f64>) -> Self {
        value.map_or(Cell::NotAvailable, Cell::Float)
    }

    /// `Int` for `Some`, `NotAvailable` for `None`.
    pub fn int(value: Option<i64>) -> Self {
        value.map_or(Cell::NotAvailable, Cell::Int)
    }

    /// `1` for true, `0` for false.
    pub fn flag(value: bool) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Float(value) if value.is_finite() => write!(f, "{value:?}"),
            Cell::Float(_) | Cell::NotAvailable => f.write_str(NOT_AVAILABLE),
            Cell::Id(value) => f.write_str(value),
        }
    }
}

/// Streams feature rows as CSV under the fixed header.
pub struct FeatureWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
    rows: usize,
}

impl<W: Write> FeatureWriter<W> {
    /// Wrap `inner` and write the header row; `path` is used for error context.
    pub fn new(inner: W, path: &Path) -> Result<Self, FeatureError> {
        let writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(inner);
        let mut this = Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        };
        this.writer
            .write_record(FEATURE_HEADER)
            .map_err(|err| this.output_err(err))?;
        Ok(this)
    }

    /// Append one feature row.
    pub fn write(&mut self, features: &FeatureVector) -> Result<(), FeatureError> {
        let row: Vec<String> = features.cells().iter().map(ToString::to_string).collect();
        self.writer
            .write_record(&row)
            .map_err(|err| self.output_err(err))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows and return the row count.
    pub fn finish(mut self) -> Result<usize, FeatureError> {
        self.writer.flush().map_err(|err| FeatureError::Output {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;
        Ok(self.rows)
    }

    fn output_err(&self, err: csv::Error) -> FeatureError {
        FeatureError::Output {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}
