use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::FeatureError;
use crate::types::{BusinessId, CategoryCode};

/// Business id to category code mapping.
///
/// Read from a CSV file with a header row followed by `business_id,code` rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryMap {
    codes: HashMap<BusinessId, CategoryCode>,
}

impl CategoryMap {
    /// Load the mapping file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, FeatureError> {
        let file = File::open(path).map_err(|err| FeatureError::Categories {
            path: path.to_path_buf(),
            reason: format!("cannot open: {err}"),
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse mapping rows from `reader`; `path` is used only for error context.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, FeatureError> {
        let categories_err = |reason: String| FeatureError::Categories {
            path: path.to_path_buf(),
            reason,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut codes = HashMap::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.map_err(|err| categories_err(err.to_string()))?;
            // +2: header row, 1-based
            let line = idx + 2;
            let (Some(id), Some(code)) = (row.get(0), row.get(1)) else {
                return Err(categories_err(format!("line {line}: expected `id,code`")));
            };
            let code = code.parse::<CategoryCode>().map_err(|_| {
                categories_err(format!("line {line}: invalid category code '{code}'"))
            })?;
            codes.insert(id.to_string(), code);
        }
        Ok(Self { codes })
    }

    /// Category code for `business_id`.
    pub fn get(&self, business_id: &str) -> Option<CategoryCode> {
        self.codes.get(business_id).copied()
    }

    /// Number of mapped businesses.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no business is mapped.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(BusinessId, CategoryCode)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (BusinessId, CategoryCode)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
