use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::constants::censoring::{DEFAULT_CENSOR_PROBABILITY, DEFAULT_SEED};
use crate::constants::sources::{
    CATEGORIES_FILE, DEFAULT_DATA_DIR, TEST_BUSINESSES, TEST_OUTPUT, TEST_REVIEWS, TEST_USERS,
    TRAINING_BUSINESSES, TRAINING_OUTPUT, TRAINING_REVIEWS, TRAINING_USERS,
};
use crate::errors::FeatureError;
use crate::splits::SplitLabel;

/// Source files, reference date, and output path of one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitInputs {
    /// Newline-delimited review records.
    pub reviews: PathBuf,
    /// Newline-delimited user records.
    pub users: PathBuf,
    /// Newline-delimited business records.
    pub businesses: PathBuf,
    /// Review ages are measured in days before this date.
    pub reference_date: NaiveDate,
    /// Destination feature file.
    pub output: PathBuf,
}

impl SplitInputs {
    /// Default file layout of `split` under `data_dir`.
    pub fn in_data_dir(split: SplitLabel, data_dir: &Path) -> Self {
        let (reviews, users, businesses, output) = match split {
            SplitLabel::Train => (TRAINING_REVIEWS, TRAINING_USERS, TRAINING_BUSINESSES, TRAINING_OUTPUT),
            SplitLabel::Test => (TEST_REVIEWS, TEST_USERS, TEST_BUSINESSES, TEST_OUTPUT),
        };
        Self {
            reviews: data_dir.join(reviews),
            users: data_dir.join(users),
            businesses: data_dir.join(businesses),
            reference_date: split.default_reference_date(),
            output: data_dir.join(output),
        }
    }

    /// Override the reference date.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    /// Override the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Top-level configuration of a feature run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Seed for the per-user censoring draw.
    pub seed: u64,
    /// Probability that a public user's vote totals are nulled out.
    pub censor_probability: f64,
    /// Business id to category code mapping file.
    pub categories: PathBuf,
    /// Optional CMU-format pronunciation dictionary; the estimator is used otherwise.
    pub pronunciations: Option<PathBuf>,
    /// Optional `word TAG` overrides for the part-of-speech tagger.
    pub tag_lexicon: Option<PathBuf>,
    /// Training split inputs.
    pub training: SplitInputs,
    /// Test split inputs.
    pub test: SplitInputs,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::in_data_dir(DEFAULT_DATA_DIR)
    }
}

impl PipelineConfig {
    /// Default layout rooted at `data_dir`.
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            seed: DEFAULT_SEED,
            censor_probability: DEFAULT_CENSOR_PROBABILITY,
            categories: data_dir.join(CATEGORIES_FILE),
            pronunciations: None,
            tag_lexicon: None,
            training: SplitInputs::in_data_dir(SplitLabel::Train, data_dir),
            test: SplitInputs::in_data_dir(SplitLabel::Test, data_dir),
        }
    }

    /// Set the censoring seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the censoring probability.
    pub fn with_censor_probability(mut self, probability: f64) -> Self {
        self.censor_probability = probability;
        self
    }

    /// Use a pronunciation dictionary file.
    pub fn with_pronunciations(mut self, path: impl Into<PathBuf>) -> Self {
        self.pronunciations = Some(path.into());
        self
    }

    /// Use a tagger override file.
    pub fn with_tag_lexicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.tag_lexicon = Some(path.into());
        self
    }

    /// Inputs of `split`.
    pub fn split(&self, split: SplitLabel) -> &SplitInputs {
        match split {
            SplitLabel::Train => &self.training,
            SplitLabel::Test => &self.test,
        }
    }

    /// User files of every split, in merge order.
    pub fn user_files(&self) -> Vec<PathBuf> {
        SplitLabel::ALL
            .iter()
            .map(|split| self.split(*split).users.clone())
            .collect()
    }

    /// Business files of every split, in merge order.
    pub fn business_files(&self) -> Vec<PathBuf> {
        SplitLabel::ALL
            .iter()
            .map(|split| self.split(*split).businesses.clone())
            .collect()
    }

    /// Reject settings that cannot produce a run.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !(0.0..=1.0).contains(&self.censor_probability) {
            return Err(FeatureError::Configuration(format!(
                "censor probability must be within [0, 1], got {}",
                self.censor_probability
            )));
        }
        if self.training.output == self.test.output {
            return Err(FeatureError::Configuration(format!(
                "training and test outputs must differ ({})",
                self.training.output.display()
            )));
        }
        Ok(())
    }
}
