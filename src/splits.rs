use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::censoring::{TEST_SALT, TRAINING_SALT};
use crate::constants::sources::{TEST_REFERENCE_DATE, TRAINING_REFERENCE_DATE};

/// Data splits that each produce one feature file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitLabel {
    /// Training split; aggregates see training reviews only.
    Train,
    /// Test split; aggregates see training and test reviews.
    Test,
}

impl SplitLabel {
    /// Both splits in output order.
    pub const ALL: [SplitLabel; 2] = [SplitLabel::Train, SplitLabel::Test];

    /// Stable lower-case name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SplitLabel::Train => "train",
            SplitLabel::Test => "test",
        }
    }

    /// Default date that review ages are measured against.
    pub fn default_reference_date(self) -> NaiveDate {
        match self {
            SplitLabel::Train => TRAINING_REFERENCE_DATE,
            SplitLabel::Test => TEST_REFERENCE_DATE,
        }
    }

    /// Salt mixed into the censoring seed so each split draws independently.
    pub fn censor_salt(self) -> u64 {
        match self {
            SplitLabel::Train => TRAINING_SALT,
            SplitLabel::Test => TEST_SALT,
        }
    }
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
