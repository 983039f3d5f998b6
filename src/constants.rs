/// Constants used by the readability formulas.
pub mod readability {
    /// ARI weight on characters per word.
    pub const ARI_CHARS_PER_WORD: f64 = 4.71;
    /// ARI weight on words per sentence.
    pub const ARI_WORDS_PER_SENTENCE: f64 = 0.5;
    /// ARI constant offset.
    pub const ARI_OFFSET: f64 = 21.43;
    /// Flesch-Kincaid weight on words per sentence.
    pub const FK_WORDS_PER_SENTENCE: f64 = 0.39;
    /// Flesch-Kincaid weight on syllables per word.
    pub const FK_SYLLABLES_PER_WORD: f64 = 11.8;
    /// Flesch-Kincaid constant offset.
    pub const FK_OFFSET: f64 = 15.59;
    /// SMOG multiplier applied to the square root term.
    pub const SMOG_SCALE: f64 = 1.0430;
    /// SMOG sentence normalization basis.
    pub const SMOG_SENTENCE_BASIS: f64 = 30.0;
    /// SMOG constant offset.
    pub const SMOG_OFFSET: f64 = 3.1291;
    /// Syllable count at which a word counts as polysyllabic.
    pub const POLYSYLLABLE_MIN: usize = 3;
}

/// Constants used by availability flags and aggregate statistics.
pub mod features {
    /// Sample count at which a user or business "has many sample reviews".
    pub const MANY_SAMPLE_REVIEWS: usize = 5;
    /// Profile review count at which a business "has many reviews".
    pub const MANY_BUSINESS_REVIEWS: u64 = 15;
    /// Minimum sample size for a rating standard deviation.
    pub const MIN_STDDEV_SAMPLES: usize = 2;
    /// Star rating treated as a moderate review.
    pub const MODERATE_STARS: f64 = 3.0;
    /// Target value emitted for reviews without vote data.
    pub const MISSING_TARGET: f64 = -1.0;
    /// Literal substring that sets `reviewContainsClosed`.
    pub const CLOSED_MARKER: &str = "closed";
}

/// Constants used by the vote-censoring draw.
pub mod censoring {
    /// Default probability that a public user's vote totals are nulled out.
    pub const DEFAULT_CENSOR_PROBABILITY: f64 = 0.3;
    /// Default RNG seed for the censoring draw.
    pub const DEFAULT_SEED: u64 = 42;
    /// Salt mixed into training-split censoring seeds.
    pub const TRAINING_SALT: u64 = 0x7261_696E;
    /// Salt mixed into test-split censoring seeds.
    pub const TEST_SALT: u64 = 0x7465_7374;
}

/// Constants used by feature file output.
pub mod output {
    /// Literal written for not-available values.
    pub const NOT_AVAILABLE: &str = "NA";
    /// Column delimiter for feature files.
    pub const DELIMITER: u8 = b',';
}

/// Constants used for default source paths and reference dates.
pub mod sources {
    use chrono::NaiveDate;

    const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None => panic!("invalid reference date"),
        }
    }

    /// Reference date for training-split review ages.
    pub const TRAINING_REFERENCE_DATE: NaiveDate = date(2013, 1, 19);
    /// Reference date for test-split review ages.
    pub const TEST_REFERENCE_DATE: NaiveDate = date(2013, 3, 12);
    /// Date format used by review records.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    /// Default data directory.
    pub const DEFAULT_DATA_DIR: &str = "data";
    /// Category mapping file relative to the data directory.
    pub const CATEGORIES_FILE: &str = "business_clusters.csv";
    /// Training review source relative to the data directory.
    pub const TRAINING_REVIEWS: &str = "training/json/yelp_training_set_review.json";
    /// Training user source relative to the data directory.
    pub const TRAINING_USERS: &str = "training/json/yelp_training_set_user.json";
    /// Training business source relative to the data directory.
    pub const TRAINING_BUSINESSES: &str = "training/json/yelp_training_set_business.json";
    /// Test review source relative to the data directory.
    pub const TEST_REVIEWS: &str = "test/json/yelp_test_set_review.json";
    /// Test user source relative to the data directory.
    pub const TEST_USERS: &str = "test/json/yelp_test_set_user.json";
    /// Test business source relative to the data directory.
    pub const TEST_BUSINESSES: &str = "test/json/yelp_test_set_business.json";
    /// Training feature output relative to the data directory.
    pub const TRAINING_OUTPUT: &str = "training/training_features.csv";
    /// Test feature output relative to the data directory.
    pub const TEST_OUTPUT: &str = "test/test_features.csv";
}
