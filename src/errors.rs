use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{BusinessId, ReviewId};

/// Error type for source loading, lexicon parsing, and feature output failures.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A review's business is absent from the category mapping.
    #[error("review '{review_id}' references business '{business_id}' with no category mapping")]
    MissingCategory {
        /// Offending review.
        review_id: ReviewId,
        /// Business without a category.
        business_id: BusinessId,
    },
    /// The corpus holds no user or business entry for a review.
    #[error("review '{review_id}' has no user or business aggregate")]
    MissingAggregate {
        /// Review that was not aggregated.
        review_id: ReviewId,
    },
    /// A source line could not be read or deserialized.
    #[error("malformed record at {}:{line}: {reason}", path.display())]
    MalformedRecord {
        /// Source file.
        path: PathBuf,
        /// 1-based line number; 0 when the file could not be opened.
        line: usize,
        /// Underlying parse or read error.
        reason: String,
    },
    /// A review date is not `YYYY-MM-DD`.
    #[error("review '{review_id}' has unparseable date '{value}'")]
    InvalidDate {
        /// Offending review.
        review_id: ReviewId,
        /// Raw date string.
        value: String,
    },
    /// The category mapping CSV is unreadable or malformed.
    #[error("category mapping {} is invalid: {reason}", path.display())]
    Categories {
        /// Mapping file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// A pronunciation or tag lexicon file is unreadable or malformed.
    #[error("lexicon error: {reason}")]
    Lexicon {
        /// What went wrong.
        reason: String,
    },
    /// A feature file could not be written.
    #[error("failed to write features to {}: {reason}", path.display())]
    Output {
        /// Destination file.
        path: PathBuf,
        /// Underlying write error.
        reason: String,
    },
    /// Invalid pipeline settings.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Untyped I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
